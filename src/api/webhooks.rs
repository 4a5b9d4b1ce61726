//! Webhook subscriptions service.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, WEBHOOKS};
use crate::client::ClientInner;
use crate::webhook::{self, NewWebhook};
use crate::Result;

/// Service for webhook subscriptions.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: loyverse_rs::LoyverseClient) -> loyverse_rs::Result<()> {
/// use loyverse_rs::models::WebhookEventType;
/// use loyverse_rs::webhook::NewWebhook;
///
/// let hook = NewWebhook::new("https://example.com/hooks", [WebhookEventType::OrderCreated]);
/// client.webhooks().create(&hook).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WebhooksService {
    resource: ResourceClient,
}

impl WebhooksService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, WEBHOOKS),
        }
    }

    list_operations!("webhooks");

    /// Get a webhook by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Subscribe a URL to events.
    pub async fn create(&self, webhook: &NewWebhook) -> Result<Value> {
        self.resource.create(webhook).await
    }

    /// Remove a subscription.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }

    /// Check an incoming delivery's signature.
    ///
    /// See [`webhook::verify_signature`].
    pub fn verify_signature(&self, payload: &[u8], signature: Option<&str>, secret: &str) -> bool {
        webhook::verify_signature(Some(payload), signature, Some(secret))
    }
}
