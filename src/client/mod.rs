//! HTTP transport and pagination for the Loyverse API.
//!
//! This module provides the main entry point [`LoyverseClient`], its
//! configuration, and the cursor pagination engine shared by every list
//! endpoint.
//!
//! # Example
//!
//! ```no_run
//! use loyverse_rs::{ClientConfig, LoyverseClient};
//! use loyverse_rs::client::ListOptions;
//!
//! # async fn example() -> loyverse_rs::Result<()> {
//! let client = LoyverseClient::new(ClientConfig::new("token"))?;
//!
//! // One page of items, resumable through its cursor
//! let page = client.items().list_page(&Default::default(), ListOptions::single_page()).await?;
//! if let Some(cursor) = page.cursor() {
//!     let next = client
//!         .items()
//!         .list_page(&Default::default(), ListOptions::single_page().with_cursor(cursor))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
pub mod request;

pub use config::{ClientConfig, RetryConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION};
pub use http::LoyverseClient;
pub use paginated::{
    ListOptions, Listing, Page, Paginate, PaginatedCollection, PaginatedStream, Paginator,
    DEFAULT_PAGE_SIZE,
};
pub use request::Request;
pub(crate) use http::ClientInner;
