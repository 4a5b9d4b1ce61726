//! Request bodies for catalog resources: categories, items, inventory,
//! discounts and modifiers.
//!
//! Optional fields left as `None` are omitted from the JSON body.

use serde::Serialize;
use serde_json::Value;

use super::enums::{AppliesTo, DiscountType};

/// A new category.
///
/// # Example
///
/// ```
/// use loyverse_rs::models::NewCategory;
///
/// let body = serde_json::to_value(NewCategory::new("Drinks")).unwrap();
/// assert_eq!(body, serde_json::json!({"name": "Drinks"}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    /// Category name
    pub name: String,
    /// Color name, e.g. `ORANGE`, `RED`, `BLUE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewCategory {
    /// Create a category body with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A new item.
///
/// `track_stock`, `sold_by_weight` and `is_composite` are always sent and
/// default to `false`. `variants` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    /// Item name
    pub item_name: String,
    /// Category UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Variant objects
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Value>,
    /// Whether stock is tracked
    pub track_stock: bool,
    /// Whether the item is sold by weight
    pub sold_by_weight: bool,
    /// Whether the item is made of other items
    pub is_composite: bool,
}

impl NewItem {
    /// Create an item body with only a name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            category_id: None,
            variants: Vec::new(),
            track_stock: false,
            sold_by_weight: false,
            is_composite: false,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Add a variant.
    pub fn with_variant(mut self, variant: Value) -> Self {
        self.variants.push(variant);
        self
    }

    /// Enable or disable stock tracking.
    pub fn with_track_stock(mut self, enabled: bool) -> Self {
        self.track_stock = enabled;
        self
    }

    /// Mark the item as sold by weight.
    pub fn with_sold_by_weight(mut self, enabled: bool) -> Self {
        self.sold_by_weight = enabled;
        self
    }

    /// Mark the item as composite.
    pub fn with_composite(mut self, enabled: bool) -> Self {
        self.is_composite = enabled;
        self
    }
}

/// Partial update of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// New category UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Replacement variants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Value>>,
    /// Stock tracking flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_stock: Option<bool>,
}

/// New stock level for a variant at a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryUpdate {
    /// Variant UUID
    pub variant_id: String,
    /// Store UUID
    pub store_id: String,
    /// Stock quantity
    pub in_stock: i64,
}

impl InventoryUpdate {
    /// Create an inventory update.
    pub fn new(variant_id: impl Into<String>, store_id: impl Into<String>, in_stock: i64) -> Self {
        Self {
            variant_id: variant_id.into(),
            store_id: store_id.into(),
            in_stock,
        }
    }
}

/// A new discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDiscount {
    /// Discount name
    pub name: String,
    /// Discount type
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    /// Percentage or fixed value; omitted for variable discounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    /// Receipt-level or item-level
    pub applies_to: AppliesTo,
    /// Whether the discount is active
    pub enabled: bool,
}

impl NewDiscount {
    /// Create an enabled receipt-level discount.
    pub fn new(name: impl Into<String>, discount_type: DiscountType) -> Self {
        Self {
            name: name.into(),
            discount_type,
            discount_amount: None,
            applies_to: AppliesTo::default(),
            enabled: true,
        }
    }

    /// Set the amount.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.discount_amount = Some(amount);
        self
    }

    /// Set what the discount applies to.
    pub fn with_applies_to(mut self, applies_to: AppliesTo) -> Self {
        self.applies_to = applies_to;
        self
    }

    /// Enable or disable the discount.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Partial update of a discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscountUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    /// New amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    /// New scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<AppliesTo>,
    /// Enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// One selectable option of a modifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierOption {
    /// Option name
    pub name: String,
    /// Price added when selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ModifierOption {
    /// Create a priced option.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
        }
    }
}

/// A new modifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewModifier {
    /// Modifier name
    pub name: String,
    /// Options to choose from
    pub options: Vec<ModifierOption>,
}

impl NewModifier {
    /// Create a modifier.
    pub fn new(name: impl Into<String>, options: Vec<ModifierOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_item_defaults() {
        let body = serde_json::to_value(NewItem::new("Latte")).unwrap();
        assert_eq!(
            body,
            json!({
                "item_name": "Latte",
                "track_stock": false,
                "sold_by_weight": false,
                "is_composite": false
            })
        );
    }

    #[test]
    fn test_new_item_with_variants() {
        let body = serde_json::to_value(
            NewItem::new("Latte")
                .with_category("cat-1")
                .with_variant(json!({"sku": "L-1", "default_price": 3.5}))
                .with_track_stock(true),
        )
        .unwrap();
        assert_eq!(body["category_id"], "cat-1");
        assert_eq!(body["variants"][0]["sku"], "L-1");
        assert_eq!(body["track_stock"], true);
    }

    #[test]
    fn test_item_update_only_sends_given_fields() {
        let update = ItemUpdate {
            track_stock: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"track_stock": false}));
    }

    #[test]
    fn test_new_discount_defaults() {
        let discount = NewDiscount::new("Happy hour", DiscountType::FixedPercent).with_amount(10.0);
        let body = serde_json::to_value(discount).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Happy hour",
                "type": "FIXED_PERCENT",
                "discount_amount": 10.0,
                "applies_to": "RECEIPT",
                "enabled": true
            })
        );
    }

    #[test]
    fn test_discount_update_renames_type() {
        let update = DiscountUpdate {
            discount_type: Some(DiscountType::VariableAmount),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"type": "VARIABLE_AMOUNT"}));
    }
}
