//! Receipts service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::resource::{list_operations, ResourceClient, RECEIPTS};
use crate::client::ClientInner;
use crate::models::{NewReceipt, NewRefund, ReceiptNumber, SortOrder, Timestamp};
use crate::Result;

/// Filters for listing receipts.
///
/// # Example
///
/// ```
/// use loyverse_rs::api::ReceiptsQuery;
/// use loyverse_rs::models::SortOrder;
///
/// let query = ReceiptsQuery::default()
///     .receipt_numbers([123, 456])
///     .order(SortOrder::Desc);
/// assert_eq!(query.receipt_numbers.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ReceiptsQuery {
    /// Only these receipts; sent comma-joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_numbers: Option<Vec<ReceiptNumber>>,
    /// Receipts after this number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_receipt_number: Option<ReceiptNumber>,
    /// Receipts before this number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_receipt_number: Option<ReceiptNumber>,
    /// Only this store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    /// Only receipts from this source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Updated at or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<Timestamp>,
    /// Updated at or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<Timestamp>,
    /// Created at or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<Timestamp>,
    /// Created at or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<Timestamp>,
}

impl ReceiptsQuery {
    /// Restrict to the given receipt numbers. An empty list clears the filter.
    pub fn receipt_numbers<I, N>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ReceiptNumber>,
    {
        let numbers: Vec<ReceiptNumber> = numbers.into_iter().map(Into::into).collect();
        self.receipt_numbers = if numbers.is_empty() { None } else { Some(numbers) };
        self
    }

    /// Receipts after `number`.
    pub fn since_receipt_number(mut self, number: impl Into<ReceiptNumber>) -> Self {
        self.since_receipt_number = Some(number.into());
        self
    }

    /// Receipts before `number`.
    pub fn before_receipt_number(mut self, number: impl Into<ReceiptNumber>) -> Self {
        self.before_receipt_number = Some(number.into());
        self
    }

    /// Filter by store.
    pub fn store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Set the sort direction.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Filter by source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the update window. Either bound may be omitted.
    pub fn updated_between(mut self, min: Option<Timestamp>, max: Option<Timestamp>) -> Self {
        self.updated_at_min = min;
        self.updated_at_max = max;
        self
    }

    /// Set the creation window. Either bound may be omitted.
    pub fn created_between(mut self, min: Option<Timestamp>, max: Option<Timestamp>) -> Self {
        self.created_at_min = min;
        self.created_at_max = max;
        self
    }
}

/// Service for sales receipts and refunds.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: loyverse_rs::LoyverseClient) -> loyverse_rs::Result<()> {
/// use futures_util::StreamExt;
/// use loyverse_rs::api::ReceiptsQuery;
///
/// let mut receipts = client.receipts().stream(&ReceiptsQuery::default().store("store-1"))?;
/// while let Some(receipt) = receipts.next().await {
///     println!("{}", receipt?["receipt_number"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ReceiptsService {
    resource: ResourceClient,
}

impl ReceiptsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            resource: ResourceClient::new(inner, RECEIPTS),
        }
    }

    list_operations!("receipts", ReceiptsQuery);

    /// Get a receipt by number.
    pub async fn get(&self, receipt_number: impl Into<ReceiptNumber>) -> Result<Value> {
        let receipt_number: ReceiptNumber = receipt_number.into();
        self.resource.get(receipt_number.as_str()).await
    }

    /// Create a receipt.
    ///
    /// POST requests are retried on timeouts and retryable statuses unless the
    /// client uses [`RetryConfig::idempotent_only`](crate::RetryConfig::idempotent_only),
    /// so a slow response can produce a duplicate receipt.
    pub async fn create(&self, receipt: &NewReceipt) -> Result<Value> {
        self.resource.create(receipt).await
    }

    /// Refund an existing receipt.
    pub async fn refund(
        &self,
        receipt_number: impl Into<ReceiptNumber>,
        refund: &NewRefund,
    ) -> Result<Value> {
        let receipt_number: ReceiptNumber = receipt_number.into();
        self.resource
            .post_action(receipt_number.as_str(), "refund", refund)
            .await
    }

    /// All receipts belonging to a customer.
    ///
    /// The API has no customer filter, so every receipt is fetched and
    /// filtered locally on `customer_id`.
    pub async fn by_customer(&self, customer_id: &str) -> Result<Vec<Value>> {
        let receipts = self.list(&ReceiptsQuery::default()).await?;
        Ok(receipts
            .into_iter()
            .filter(|receipt| {
                receipt.get("customer_id").and_then(Value::as_str) == Some(customer_id)
            })
            .collect())
    }
}
