//! Inventory item record.
//!
//! # Responsibility
//! - Describe one stocked product: name, unit price and quantity on hand.
//! - Provide display helpers shared by the inventory screen.
//!
//! # Invariants
//! - `id` is generated by the store and immutable after creation.
//! - Quantity never drops below zero through `sell_one`.

use serde::{Deserialize, Serialize};

/// Store-generated identifier of an inventory row.
pub type ItemId = i64;

/// One row of the `items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl Item {
    /// Whether at least one unit can still be sold.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Price rendered as a dollar amount, e.g. `$4.50`.
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

/// Insert payload for an inventory row; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Attaches the store-generated id, producing the persisted shape.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

pub(crate) fn format_price(price: f64) -> String {
    if price < 0.0 {
        format!("-${:.2}", -price)
    } else {
        format!("${price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_price, NewItem};

    #[test]
    fn formats_price_with_two_decimals() {
        assert_eq!(format_price(4.5), "$4.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(-1.25), "-$1.25");
    }

    #[test]
    fn stock_state_follows_quantity() {
        let mut item = NewItem::new("Pears", 2.0, 1).into_item(3);
        assert!(item.is_in_stock());
        item.quantity = 0;
        assert!(!item.is_in_stock());
    }
}
