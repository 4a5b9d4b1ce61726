//! Items service.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, UpdatedAtQuery, ITEMS};
use crate::client::ClientInner;
use crate::models::{ItemUpdate, NewItem};
use crate::Result;

/// Filters for listing items.
pub type ItemsQuery = UpdatedAtQuery;

/// Service for items and their variants.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: loyverse_rs::LoyverseClient) -> loyverse_rs::Result<()> {
/// use loyverse_rs::api::ItemsQuery;
///
/// let recent = client
///     .items()
///     .list(&ItemsQuery::since("2024-01-01T00:00:00.000Z"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ItemsService {
    resource: ResourceClient,
}

impl ItemsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, ITEMS),
        }
    }

    list_operations!("items", ItemsQuery);

    /// Get an item by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Create an item.
    pub async fn create(&self, item: &NewItem) -> Result<Value> {
        self.resource.create(item).await
    }

    /// Update an item. Only the fields set on `update` are sent.
    pub async fn update(&self, id: &str, update: &ItemUpdate) -> Result<Value> {
        self.resource.update(id, update).await
    }

    /// Delete an item.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }
}
