//! Quote cart line items.
//!
//! The cart never prices anything. It only remembers which machines a shopper
//! wants quoted and in what quantity.

use crate::model::product::{Product, ProductId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One cart line, a snapshot of the product taken when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub price: String,
    pub category: String,
    pub quantity: i64,
    pub added_at: i64,
}

impl CartItem {
    /// Creates a single-unit line for `product`.
    pub fn from_product(product: &Product, added_at: i64) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            image: product.primary_image().map(str::to_string),
            price: product.price.clone(),
            category: product.category.clone(),
            quantity: 1,
            added_at,
        }
    }
}

/// Cart contents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Sum of quantities across lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// Validates a stored quantity (`1..=MAX_QUANTITY_PER_ITEM`).
pub fn validate_quantity(quantity: i64) -> Result<i64, ValidationError> {
    if (1..=MAX_QUANTITY_PER_ITEM).contains(&quantity) {
        Ok(quantity)
    } else {
        Err(ValidationError::QuantityOutOfRange(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_quantity, Cart, CartItem, MAX_QUANTITY_PER_ITEM};
    use uuid::Uuid;

    fn line(name: &str, quantity: i64) -> CartItem {
        CartItem {
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            image: None,
            price: "Contact for price".to_string(),
            category: "planers".to_string(),
            quantity,
            added_at: 0,
        }
    }

    #[test]
    fn totals_sum_quantities() {
        let cart = Cart::new(vec![line("Planer", 2), line("Sander", 3)]);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.unique_items(), 2);
        assert!(!cart.is_empty());
        assert!(Cart::default().is_empty());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY_PER_ITEM).is_ok());
        assert!(validate_quantity(MAX_QUANTITY_PER_ITEM + 1).is_err());
    }
}
