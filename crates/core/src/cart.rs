//! Session cart state and arithmetic.
//!
//! The cart is owned by the browser session (the storefront keeps it in the
//! session layer); it is destroyed on checkout completion or explicit clear.
//! Everything here is plain in-memory state - stock and pricing authority
//! stay server-side.

use serde::{Deserialize, Serialize};

use crate::types::{Naira, ProductId};

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Naira,
    pub quantity: u32,
    /// Primary product image, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLine {
    /// Line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Naira {
        self.price.times(self.quantity)
    }
}

/// The session cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a line, merging quantities when the product is already present.
    ///
    /// The most recent price/name/image win on a merge; the API copy we just
    /// fetched is fresher than whatever the session was holding.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                existing.price = line.price;
                existing.name = line.name;
                existing.image = line.image;
            }
            None => self.lines.push(line),
        }
    }

    /// Set a line's quantity. Quantity zero removes the line.
    ///
    /// Returns false when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns false when the product is not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() != before
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Naira {
        self.lines
            .iter()
            .fold(Naira::ZERO, |acc, line| acc + line.line_total())
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Naira::from(price),
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 1));
        cart.add(line("P1", 4500, 2));

        assert_eq!(cart.lines.len(), 1);
        let merged = cart.lines.first().expect("one line");
        assert_eq!(merged.quantity, 3);
        // Latest price wins.
        assert_eq!(merged.price, Naira::from(4500));
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 1));

        assert!(cart.update_quantity(&ProductId::new("P1"), 4));
        assert_eq!(cart.item_count(), 4);

        // Zero removes the line.
        assert!(cart.update_quantity(&ProductId::new("P1"), 0));
        assert!(cart.is_empty());

        assert!(!cart.update_quantity(&ProductId::new("P9"), 1));
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 1));
        cart.add(line("P2", 2000, 2));

        assert!(cart.remove(&ProductId::new("P1")));
        assert!(!cart.remove(&ProductId::new("P1")));
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 2));
        cart.add(line("P2", 1500, 3));

        assert_eq!(cart.subtotal(), Naira::from(14_500));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::empty();
        cart.add(line("P1", 5000, 2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Naira::ZERO);
    }
}
