//! Enumeration types for the Loyverse API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a discount's amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Fixed percentage set on the discount
    FixedPercent,
    /// Fixed amount set on the discount
    FixedAmount,
    /// Percentage entered at the register
    VariablePercent,
    /// Amount entered at the register
    VariableAmount,
    /// Redeemed loyalty points
    DiscountByPoints,
}

impl DiscountType {
    /// Returns `true` if the amount is entered at sale time.
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            DiscountType::VariablePercent | DiscountType::VariableAmount
        )
    }
}

/// What a discount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppliesTo {
    /// The whole receipt
    #[default]
    Receipt,
    /// Individual items
    Item,
}

/// Receipt type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptType {
    /// A sale
    #[default]
    Sale,
    /// A refund
    Refund,
}

/// Sort order for receipt listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

/// Event types a webhook can subscribe to.
///
/// Unrecognised names are preserved in [`WebhookEventType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WebhookEventType {
    /// A receipt was created
    OrderCreated,
    /// An item changed
    ItemUpdated,
    /// Stock levels changed
    InventoryUpdated,
    /// Any other event name
    Other(String),
}

impl WebhookEventType {
    /// Wire name of the event.
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::OrderCreated => "ORDER_CREATED",
            WebhookEventType::ItemUpdated => "ITEM_UPDATED",
            WebhookEventType::InventoryUpdated => "INVENTORY_UPDATED",
            WebhookEventType::Other(name) => name,
        }
    }
}

impl From<String> for WebhookEventType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ORDER_CREATED" => WebhookEventType::OrderCreated,
            "ITEM_UPDATED" => WebhookEventType::ItemUpdated,
            "INVENTORY_UPDATED" => WebhookEventType::InventoryUpdated,
            _ => WebhookEventType::Other(name),
        }
    }
}

impl From<&str> for WebhookEventType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<WebhookEventType> for String {
    fn from(event: WebhookEventType) -> Self {
        event.as_str().to_string()
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discount_type_wire_names() {
        assert_eq!(
            serde_json::to_value(DiscountType::DiscountByPoints).unwrap(),
            json!("DISCOUNT_BY_POINTS")
        );
        assert_eq!(
            serde_json::from_value::<DiscountType>(json!("FIXED_PERCENT")).unwrap(),
            DiscountType::FixedPercent
        );
        assert!(DiscountType::VariableAmount.is_variable());
        assert!(!DiscountType::FixedAmount.is_variable());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AppliesTo::default(), AppliesTo::Receipt);
        assert_eq!(ReceiptType::default(), ReceiptType::Sale);
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), json!("DESC"));
    }

    #[test]
    fn test_webhook_event_type_preserves_unknown() {
        let event: WebhookEventType = serde_json::from_value(json!("CUSTOMER_CREATED")).unwrap();
        assert_eq!(event, WebhookEventType::Other("CUSTOMER_CREATED".into()));
        assert_eq!(serde_json::to_value(&event).unwrap(), json!("CUSTOMER_CREATED"));

        let event: WebhookEventType = serde_json::from_value(json!("ITEM_UPDATED")).unwrap();
        assert_eq!(event, WebhookEventType::ItemUpdated);
    }
}
