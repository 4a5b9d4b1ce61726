//! Request bodies for receipts, refunds and customers.

use serde::Serialize;
use serde_json::Value;

use super::enums::ReceiptType;
use super::primitives::Timestamp;

/// Default `source` for receipts created through the API.
pub const DEFAULT_RECEIPT_SOURCE: &str = "API";

/// A new receipt.
///
/// # Example
///
/// ```
/// use loyverse_rs::models::NewReceipt;
/// use serde_json::json;
///
/// let receipt = NewReceipt::new(
///     "2024-05-01T12:00:00.000Z",
///     "store-uuid",
///     vec![json!({"variant_id": "v-1", "quantity": 2})],
///     vec![json!({"payment_type_id": "cash", "money_amount": 7.0})],
/// )
/// .with_note("table 4");
///
/// let body = serde_json::to_value(&receipt).unwrap();
/// assert_eq!(body["receipt_type"], "SALE");
/// assert_eq!(body["source"], "API");
/// assert!(body.get("customer_id").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReceipt {
    /// When the sale happened
    pub receipt_date: Timestamp,
    /// Sale or refund
    pub receipt_type: ReceiptType,
    /// Store UUID
    pub store_id: String,
    /// Line item objects
    pub line_items: Vec<Value>,
    /// Payment objects
    pub payments: Vec<Value>,
    /// Where the receipt came from
    pub source: String,
    /// Employee UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Customer UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewReceipt {
    /// Create a sale receipt with source `API`.
    pub fn new(
        receipt_date: impl Into<Timestamp>,
        store_id: impl Into<String>,
        line_items: Vec<Value>,
        payments: Vec<Value>,
    ) -> Self {
        Self {
            receipt_date: receipt_date.into(),
            receipt_type: ReceiptType::default(),
            store_id: store_id.into(),
            line_items,
            payments,
            source: DEFAULT_RECEIPT_SOURCE.to_string(),
            employee_id: None,
            customer_id: None,
            note: None,
        }
    }

    /// Set the receipt type.
    pub fn with_receipt_type(mut self, receipt_type: ReceiptType) -> Self {
        self.receipt_type = receipt_type;
        self
    }

    /// Set the employee.
    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Set the customer.
    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Set the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// A refund against an existing receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRefund {
    /// When the refund happened
    pub refund_date: Timestamp,
    /// Line items being refunded
    pub line_items: Vec<Value>,
    /// Refund payments
    pub payments: Vec<Value>,
    /// Employee UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewRefund {
    /// Create a refund body.
    pub fn new(
        refund_date: impl Into<Timestamp>,
        line_items: Vec<Value>,
        payments: Vec<Value>,
    ) -> Self {
        Self {
            refund_date: refund_date.into(),
            line_items,
            payments,
            employee_id: None,
            note: None,
        }
    }

    /// Set the employee.
    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Set the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A new customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCustomer {
    /// Customer name
    pub name: String,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region or state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Merchant-assigned code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Date of first visit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_visit: Option<Timestamp>,
    /// Number of visits so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_visits: Option<u32>,
    /// Amount spent so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<f64>,
}

impl NewCustomer {
    /// Create a customer body with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number.
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Set the first visit.
    pub fn with_first_visit(mut self, at: impl Into<Timestamp>) -> Self {
        self.first_visit = Some(at.into());
        self
    }
}

/// Partial update of a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerUpdate {
    /// Customer name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region or state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Merchant-assigned code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_new_customer_compacts() {
        let body = serde_json::to_value(
            NewCustomer::new("Ada")
                .with_email("ada@example.com")
                .with_first_visit(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "first_visit": "2024-02-29T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_refund_optional_fields() {
        let refund =
            NewRefund::new("2024-05-02T09:00:00.000Z", vec![], vec![]).with_employee("emp-1");
        let body = serde_json::to_value(refund).unwrap();
        assert_eq!(body["employee_id"], "emp-1");
        assert!(body.get("note").is_none());
    }

    #[test]
    fn test_customer_update_empty() {
        assert_eq!(serde_json::to_value(CustomerUpdate::default()).unwrap(), json!({}));
    }
}
