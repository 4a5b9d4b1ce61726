//! Employees service. Read-only.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{list_operations, ResourceClient, UpdatedAtQuery, EMPLOYEES};
use crate::client::ClientInner;
use crate::Result;

/// Service for employees.
#[derive(Clone)]
pub struct EmployeesService {
    resource: ResourceClient,
}

impl EmployeesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, EMPLOYEES),
        }
    }

    list_operations!("employees", UpdatedAtQuery);

    /// Get an employee by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.resource.get(id).await
    }
}
