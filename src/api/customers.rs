//! Customers service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::resource::{list_operations, ResourceClient, CUSTOMERS};
use crate::client::ClientInner;
use crate::models::{CustomerUpdate, NewCustomer, Timestamp};
use crate::Result;

/// Filters for listing customers.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CustomersQuery {
    /// Exact email match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Exact phone number match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Updated at or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<Timestamp>,
    /// Updated at or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<Timestamp>,
}

impl CustomersQuery {
    /// Filter by email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Filter by phone number.
    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Set the lower update bound.
    pub fn updated_since(mut self, at: impl Into<Timestamp>) -> Self {
        self.updated_at_min = Some(at.into());
        self
    }
}

/// Service for customer records.
#[derive(Clone)]
pub struct CustomersService {
    resource: ResourceClient,
}

impl CustomersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, CUSTOMERS),
        }
    }

    list_operations!("customers", CustomersQuery);

    /// Get a customer by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }

    /// Create a customer.
    pub async fn create(&self, customer: &NewCustomer) -> Result<Value> {
        self.resource.create(customer).await
    }

    /// Update a customer.
    pub async fn update(&self, id: &str, update: &CustomerUpdate) -> Result<Value> {
        self.resource.update(id, update).await
    }

    /// Delete a customer.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>> {
        self.resource.delete(id).await
    }
}
