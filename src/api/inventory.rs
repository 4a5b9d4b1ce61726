//! Inventory levels service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::resource::{list_operations, ResourceClient, INVENTORY};
use crate::client::ClientInner;
use crate::models::{InventoryUpdate, Timestamp};
use crate::Result;

/// Filters for listing inventory levels.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct InventoryQuery {
    /// Only this variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Only this store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Updated at or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<Timestamp>,
    /// Updated at or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<Timestamp>,
}

impl InventoryQuery {
    /// Filter by variant.
    pub fn variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Filter by store.
    pub fn store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Set the lower update bound.
    pub fn updated_since(mut self, at: impl Into<Timestamp>) -> Self {
        self.updated_at_min = Some(at.into());
        self
    }

    /// Set the upper update bound.
    pub fn updated_until(mut self, at: impl Into<Timestamp>) -> Self {
        self.updated_at_max = Some(at.into());
        self
    }
}

/// Service for stock levels per variant and store.
///
/// Responses list records under `inventory_levels`.
#[derive(Clone)]
pub struct InventoryService {
    resource: ResourceClient,
}

impl InventoryService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, INVENTORY),
        }
    }

    list_operations!("inventory levels", InventoryQuery);

    /// Set the stock level of a variant at a store.
    ///
    /// Sent as `PUT inventory` with the update as the body.
    pub async fn update(&self, update: &InventoryUpdate) -> Result<Value> {
        self.resource.replace(update).await
    }

    /// All inventory levels of one variant.
    pub async fn by_variant(&self, variant_id: &str) -> Result<Vec<Value>> {
        self.list(&InventoryQuery::default().variant(variant_id)).await
    }

    /// All inventory levels at one store.
    pub async fn by_store(&self, store_id: &str) -> Result<Vec<Value>> {
        self.list(&InventoryQuery::default().store(store_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request::compact_query;

    #[test]
    fn test_inventory_query_omits_unset() {
        let pairs = compact_query(&InventoryQuery::default().store("s-1")).unwrap();
        assert_eq!(pairs, vec![("store_id".to_string(), "s-1".to_string())]);
    }
}
