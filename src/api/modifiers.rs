//! Modifiers service.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, UpdatedAtQuery, MODIFIERS};
use crate::client::ClientInner;
use crate::models::NewModifier;
use crate::Result;

/// Service for item modifiers.
#[derive(Clone)]
pub struct ModifiersService {
    resource: ResourceClient,
}

impl ModifiersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, MODIFIERS),
        }
    }

    list_operations!("modifiers", UpdatedAtQuery);

    /// Get a modifier by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Create a modifier.
    pub async fn create(&self, modifier: &NewModifier) -> Result<Value> {
        self.resource.create(modifier).await
    }

    /// Delete a modifier.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }
}
