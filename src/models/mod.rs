//! Request models for the Loyverse API.
//!
//! Responses are returned as [`serde_json::Value`]; the types here describe
//! what this crate sends.

mod catalog;
mod enums;
mod primitives;
mod sales;

pub use catalog::*;
pub use enums::*;
pub use primitives::*;
pub use sales::*;
