//! Cart wire models

use serde::{Deserialize, Serialize};

/// Tax rate the backend applies to cart subtotals.
pub const TAX_RATE: f64 = 0.10;

/// A line item in a shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: u64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl CartItem {
    /// Build a line item, deriving the line total from quantity and unit
    /// price.
    pub fn new(
        product_id: u64,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price: unit_price * f64::from(quantity),
        }
    }

    /// Change the quantity, keeping the line total consistent.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.unit_price * f64::from(quantity);
    }
}

/// A shopping cart as returned by the cart endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
}

impl Cart {
    /// Add an item and recalculate totals.
    pub fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
        self.recalculate_totals();
    }

    /// Remove every line for a product and recalculate totals.
    pub fn remove_item(&mut self, product_id: u64) {
        self.items.retain(|item| item.product_id != product_id);
        self.recalculate_totals();
    }

    /// Update a line's quantity and recalculate totals. Unknown product
    /// ids are ignored.
    pub fn update_item_quantity(&mut self, product_id: u64, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.set_quantity(quantity);
            self.recalculate_totals();
        }
    }

    fn recalculate_totals(&mut self) {
        self.subtotal = self.items.iter().map(|item| item.total_price).sum();
        self.tax = self.subtotal * TAX_RATE;
        self.total = self.subtotal + self.tax;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_money_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_item_total_follows_quantity() {
        let mut item = CartItem::new(1, "Smartphone", 1, 599.99);
        assert_money_eq(item.total_price, 599.99);

        item.set_quantity(2);
        assert_money_eq(item.total_price, 1199.98);
    }

    #[test]
    fn test_cart_totals_include_tax() {
        let mut cart = Cart::default();
        cart.add_item(CartItem::new(1, "Smartphone", 1, 599.99));
        cart.add_item(CartItem::new(2, "Wireless Headphones", 2, 149.99));

        assert_money_eq(cart.subtotal, 899.97);
        assert_money_eq(cart.tax, 89.997);
        assert_money_eq(cart.total, 989.967);
    }

    #[test]
    fn test_remove_and_update() {
        let mut cart = Cart::default();
        cart.add_item(CartItem::new(1, "Smartphone", 1, 599.99));
        cart.add_item(CartItem::new(2, "Wireless Headphones", 1, 149.99));

        cart.update_item_quantity(2, 3);
        assert_money_eq(cart.subtotal, 599.99 + 449.97);

        cart.remove_item(1);
        assert_eq!(cart.items.len(), 1);
        assert_money_eq(cart.subtotal, 449.97);

        cart.remove_item(2);
        assert!(cart.items.is_empty());
        assert_money_eq(cart.total, 0.0);
    }

    #[test]
    fn test_wire_format_round_trip() {
        let json = r#"{
            "id": "cart-1",
            "userId": "user-123",
            "items": [
                {"productId": 1, "productName": "Smartphone", "quantity": 1,
                 "unitPrice": 599.99, "totalPrice": 599.99}
            ],
            "subtotal": 599.99,
            "tax": 60.00,
            "total": 659.99
        }"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.user_id, "user-123");
        assert_eq!(cart.items[0].product_name, "Smartphone");
        assert_money_eq(cart.total, 659.99);
    }
}
