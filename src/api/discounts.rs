//! Discounts service.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, UpdatedAtQuery, DISCOUNTS};
use crate::client::ClientInner;
use crate::models::{DiscountUpdate, NewDiscount};
use crate::Result;

/// Service for discounts.
#[derive(Clone)]
pub struct DiscountsService {
    resource: ResourceClient,
}

impl DiscountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, DISCOUNTS),
        }
    }

    list_operations!("discounts", UpdatedAtQuery);

    /// Get a discount by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Create a discount.
    pub async fn create(&self, discount: &NewDiscount) -> Result<Value> {
        self.resource.create(discount).await
    }

    /// Update a discount.
    pub async fn update(&self, id: &str, update: &DiscountUpdate) -> Result<Value> {
        self.resource.update(id, update).await
    }

    /// Delete a discount.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }
}
