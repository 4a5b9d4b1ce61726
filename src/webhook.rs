//! Webhook deliveries: signature verification and payload decoding.
//!
//! Loyverse signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by the webhook secret, and sends the lowercase hex digest in the
//! [`SIGNATURE_HEADER`] header.
//!
//! # Example
//!
//! ```
//! use loyverse_rs::webhook::{WebhookEvent, WebhookVerifier};
//!
//! let verifier = WebhookVerifier::new("key");
//! let body = br#"{"event_type":"ITEM_UPDATED","data":{"id":"i-1"}}"#;
//! let signature = verifier.sign(body);
//!
//! let event = verifier.parse(body, Some(&signature)).unwrap();
//! assert_eq!(event.event_type.as_str(), "ITEM_UPDATED");
//! ```

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::models::WebhookEventType;
use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "X-Loyverse-Signature";

/// Verify a webhook signature.
///
/// Returns `false` when any input is missing, when the signature length
/// differs from the expected digest, or when the digests differ. Never
/// panics. The byte comparison runs in constant time.
pub fn verify_signature(
    payload: Option<&[u8]>,
    signature: Option<&str>,
    secret: Option<&str>,
) -> bool {
    let (Some(payload), Some(signature), Some(secret)) = (payload, signature, secret) else {
        return false;
    };

    let Some(expected) = compute_signature(payload, secret) else {
        return false;
    };

    if expected.len() != signature.len() {
        return false;
    }

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

fn compute_signature(payload: &[u8], secret: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Holds a webhook secret and checks deliveries against it.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Create a verifier for `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
        }
    }

    /// Returns `true` if `signature` matches `payload`.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> bool {
        verify_signature(Some(payload), signature, Some(self.secret.expose_secret()))
    }

    /// Hex signature this verifier expects for `payload`.
    pub fn sign(&self, payload: &[u8]) -> String {
        compute_signature(payload, self.secret.expose_secret()).unwrap_or_default()
    }

    /// Verify and decode a delivery.
    pub fn parse(&self, payload: &[u8], signature: Option<&str>) -> Result<WebhookEvent> {
        if !self.verify(payload, signature) {
            tracing::warn!("Rejected webhook delivery with invalid signature");
            return Err(Error::InvalidInput("invalid webhook signature".to_string()));
        }
        WebhookEvent::from_slice(payload)
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// What happened
    pub event_type: WebhookEventType,
    /// Event payload
    #[serde(default)]
    pub data: Value,
    /// When it happened, as sent by Loyverse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl WebhookEvent {
    /// Decode a delivery body.
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }
}

/// A new webhook subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWebhook {
    /// Delivery URL
    pub url: String,
    /// Subscribed events
    pub event_types: Vec<WebhookEventType>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewWebhook {
    /// Create a subscription for `event_types`.
    pub fn new(
        url: impl Into<String>,
        event_types: impl IntoIterator<Item = WebhookEventType>,
    ) -> Self {
        Self {
            url: url.into(),
            event_types: event_types.into_iter().collect(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAYLOAD: &[u8] = b"The quick brown fox jumps over the lazy dog";
    const SIGNATURE: &str = "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8";

    #[test]
    fn test_known_vector() {
        assert!(verify_signature(Some(PAYLOAD), Some(SIGNATURE), Some("key")));
        assert_eq!(WebhookVerifier::new("key").sign(PAYLOAD), SIGNATURE);
    }

    #[test]
    fn test_single_bit_mutation_rejected() {
        for index in 0..SIGNATURE.len() {
            for bit in 0..7 {
                let mut bytes = SIGNATURE.as_bytes().to_vec();
                bytes[index] ^= 1 << bit;
                let mutated = String::from_utf8(bytes).unwrap();
                assert!(!verify_signature(Some(PAYLOAD), Some(&mutated), Some("key")));
            }
        }
    }

    #[test]
    fn test_missing_inputs_rejected() {
        assert!(!verify_signature(None, Some(SIGNATURE), Some("key")));
        assert!(!verify_signature(Some(PAYLOAD), None, Some("key")));
        assert!(!verify_signature(Some(PAYLOAD), Some(SIGNATURE), None));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(!verify_signature(Some(PAYLOAD), Some(&SIGNATURE[..10]), Some("key")));
        assert!(!verify_signature(Some(PAYLOAD), Some(""), Some("key")));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        assert!(!WebhookVerifier::new("other").verify(PAYLOAD, Some(SIGNATURE)));
    }

    #[test]
    fn test_parse_event() {
        let body = serde_json::to_vec(&json!({
            "event_type": "INVENTORY_UPDATED",
            "data": {"variant_id": "v-1", "in_stock": 4},
            "timestamp": "2024-05-01T12:00:00.000Z"
        }))
        .unwrap();
        let verifier = WebhookVerifier::new("secret");
        let signature = verifier.sign(&body);

        let event = verifier.parse(&body, Some(&signature)).unwrap();
        assert_eq!(event.event_type, WebhookEventType::InventoryUpdated);
        assert_eq!(event.data["in_stock"], 4);
        assert_eq!(event.timestamp.as_deref(), Some("2024-05-01T12:00:00.000Z"));

        let err = verifier.parse(&body, Some("bad")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_new_webhook_body() {
        let body = serde_json::to_value(NewWebhook::new(
            "https://example.com/hook",
            [WebhookEventType::OrderCreated, WebhookEventType::from("CUSTOMER_CREATED")],
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://example.com/hook",
                "event_types": ["ORDER_CREATED", "CUSTOMER_CREATED"]
            })
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        assert!(!format!("{:?}", WebhookVerifier::new("hunter2")).contains("hunter2"));
    }
}
