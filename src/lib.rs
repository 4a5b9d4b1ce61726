//! # loyverse-rs
//!
//! An async Rust client for the Loyverse point-of-sale REST API.
//!
//! ## Features
//!
//! - **Resources**: categories, items, inventory, receipts, customers,
//!   discounts, employees, modifiers and webhooks
//! - **Pagination**: cursor-following exhaustive fetch, single-page fetch and a
//!   lazy item stream
//! - **Errors**: HTTP statuses mapped to typed errors carrying the API's
//!   message, code and details
//! - **Retries**: exponential backoff with jitter for rate limits, server
//!   errors and timeouts
//! - **Webhooks**: HMAC-SHA256 signature verification
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loyverse_rs::{ClientConfig, LoyverseClient};
//! use loyverse_rs::api::ItemsQuery;
//! use loyverse_rs::models::NewCategory;
//!
//! #[tokio::main]
//! async fn main() -> loyverse_rs::Result<()> {
//!     let client = LoyverseClient::new(ClientConfig::new("your-access-token"))?;
//!
//!     let category = client.categories().create(&NewCategory::new("Drinks")).await?;
//!     println!("Created {}", category["id"]);
//!
//!     // Follows every cursor until the last page
//!     let items = client.items().list(&ItemsQuery::default()).await?;
//!     println!("Found {} items", items.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use loyverse_rs::{Error, ErrorKind, LoyverseClient};
//!
//! # async fn example(client: LoyverseClient) {
//! match client.customers().get("missing").await {
//!     Ok(customer) => println!("{customer}"),
//!     Err(Error::NotFound(err)) => println!("no such customer: {:?}", err.message),
//!     Err(err) if err.kind() == ErrorKind::RateLimit => println!("slow down"),
//!     Err(err) => println!("failed: {err}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod webhook;

// Re-export primary types at crate root for convenience
pub use client::{ClientConfig, ListOptions, LoyverseClient, Paginate, RetryConfig};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use models::{ReceiptNumber, Timestamp};

/// Prelude module for convenient imports.
///
/// ```rust
/// use loyverse_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{CustomersQuery, InventoryQuery, ItemsQuery, ReceiptsQuery, UpdatedAtQuery};
    pub use crate::client::{
        ClientConfig, ListOptions, Listing, LoyverseClient, Paginate, PaginatedCollection,
        PaginatedStream, RetryConfig,
    };
    pub use crate::error::{ApiError, Error, ErrorKind, Result};
    pub use crate::models::{
        // Primitives
        ReceiptNumber, Timestamp,
        // Enums
        AppliesTo, DiscountType, ReceiptType, SortOrder, WebhookEventType,
        // Request bodies
        CustomerUpdate, DiscountUpdate, InventoryUpdate, ItemUpdate, NewCategory, NewCustomer,
        NewDiscount, NewItem, NewModifier, NewReceipt, NewRefund, ModifierOption,
    };
    pub use crate::webhook::{NewWebhook, WebhookEvent, WebhookVerifier};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_token() {
        let err = LoyverseClient::new(ClientConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn test_services_share_one_client() {
        let client = LoyverseClient::with_token("token").unwrap();
        let _ = client.items();
        let _ = client.receipts();
        assert_eq!(client.config().base_url(), "https://api.loyverse.com/v1.0");
    }
}
