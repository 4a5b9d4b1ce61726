//! Categories service.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, CATEGORIES};
use crate::client::ClientInner;
use crate::models::NewCategory;
use crate::Result;

/// Service for item categories.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: loyverse_rs::LoyverseClient) -> loyverse_rs::Result<()> {
/// use loyverse_rs::models::NewCategory;
///
/// let created = client.categories().create(&NewCategory::new("Drinks")).await?;
/// let all = client.categories().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CategoriesService {
    resource: ResourceClient,
}

impl CategoriesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, CATEGORIES),
        }
    }

    list_operations!("categories");

    /// Get a category by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Create a category.
    pub async fn create(&self, category: &NewCategory) -> Result<Value> {
        self.resource.create(category).await
    }

    /// Delete a category.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }
}
