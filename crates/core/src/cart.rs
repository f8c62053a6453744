//! Cart lines and the quantity/variant merging engine.
//!
//! A line's identity is the triple (product id, chosen color, chosen size).
//! Adding with an existing key merges quantities; removing deletes the
//! whole line. Decrements that would reach zero are discarded and the line
//! keeps its prior quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// One entry in the cart: a product snapshot plus quantity and the chosen
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartLine {
    /// Whether this line matches the given identity key.
    fn matches(&self, id: &str, color: Option<&str>, size: Option<&str>) -> bool {
        self.product.id == id
            && self.selected_color.as_deref() == color
            && self.selected_size.as_deref() == size
    }

    /// Price of the whole line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The cart for one browser profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from previously stored lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart, yielding its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Add `quantity` of a product with the chosen variant.
    ///
    /// If a line with the same (id, color, size) key already exists its
    /// quantity is incremented, saturating at `u32::MAX`; otherwise a new
    /// line is appended.
    pub fn add(
        &mut self,
        product: Product,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, color.as_deref(), size.as_deref()))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            product,
            quantity,
            selected_color: color,
            selected_size: size,
        });
    }

    /// Remove the line matching (id, color, size) entirely.
    pub fn remove(&mut self, id: &str, color: Option<&str>, size: Option<&str>) {
        self.lines.retain(|line| !line.matches(id, color, size));
    }

    /// Add `delta` to the matching line's quantity.
    ///
    /// A delta that would take the quantity to zero or below is discarded
    /// and the line keeps its previous quantity; an increment past
    /// `u32::MAX` saturates. Lines are never removed through this path;
    /// that is what [`Cart::remove`] is for.
    pub fn update_quantity(
        &mut self,
        id: &str,
        delta: i64,
        color: Option<&str>,
        size: Option<&str>,
    ) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(id, color, size))
        {
            let updated = i64::from(line.quantity).saturating_add(delta);
            if updated > 0 {
                line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            }
        }
    }

    /// Empty all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of items across all lines, saturating at `u32::MAX`.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of (unit price x quantity) across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: "desc".to_string(),
            price: Decimal::from(price),
            category: "earphones".to_string(),
            image: String::new(),
            is_best_seller: false,
            stock: 10,
            colors: None,
            sizes: None,
            weight: None,
            dimensions: None,
            material: None,
            features: None,
            shape: None,
        }
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, Some("Black".to_string()), None);
        cart.add(product("p", 100), 1, Some("Black".to_string()), None);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn test_add_quantities_sum_over_repeated_adds() {
        let mut cart = Cart::new();
        for quantity in [1, 4, 2, 3] {
            cart.add(product("p", 50), quantity, None, Some("L".to_string()));
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 10);
    }

    #[test]
    fn test_add_distinct_variants_get_own_lines() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 1, Some("Black".to_string()), None);
        cart.add(product("p", 100), 1, Some("Silver".to_string()), None);
        cart.add(product("p", 100), 1, Some("Black".to_string()), Some("L".to_string()));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_remove_deletes_only_matching_variant() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, Some("Black".to_string()), None);
        cart.add(product("p", 100), 1, Some("Silver".to_string()), None);

        cart.remove("p", Some("Black"), None);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].selected_color.as_deref(), Some("Silver"));
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 5, None, None);
        cart.remove("p", None, None);
        cart.add(product("p", 100), 2, None, None);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_applies_delta() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, None, None);

        cart.update_quantity("p", 3, None, None);
        assert_eq!(cart.lines()[0].quantity, 5);

        cart.update_quantity("p", -4, None, None);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_discards_non_positive_result() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, None, None);

        cart.update_quantity("p", -2, None, None);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.update_quantity("p", -10, None, None);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_ignores_missing_line() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, Some("Black".to_string()), None);

        // Same id but different variant key: no line matches
        cart.update_quantity("p", 1, Some("Silver"), None);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_saturates_near_max_quantity() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), u32::MAX, None, None);
        cart.add(product("p", 100), 2, None, None);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_count_saturates_across_lines() {
        let mut cart = Cart::new();
        cart.add(product("a", 100), u32::MAX, None, None);
        cart.add(product("b", 100), u32::MAX, None, None);

        assert_eq!(cart.count(), u32::MAX);
    }

    #[test]
    fn test_update_quantity_saturates_on_huge_delta() {
        let mut cart = Cart::new();
        cart.add(product("p", 100), 2, None, None);

        cart.update_quantity("p", i64::MAX, None, None);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);

        // Saturated i64 math still floors correctly on the way down
        cart.update_quantity("p", i64::MIN, None, None);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_count_and_total_identities() {
        let mut cart = Cart::new();
        cart.add(product("a", 100), 2, None, None);
        cart.add(product("b", 349), 1, None, None);
        cart.add(product("c", 25), 4, Some("Red".to_string()), None);

        assert_eq!(cart.count(), 7);
        assert_eq!(cart.total(), Decimal::from(2 * 100 + 349 + 4 * 25));
    }

    #[test]
    fn test_clear_empties_all_lines() {
        let mut cart = Cart::new();
        cart.add(product("a", 100), 2, None, None);
        cart.add(product("b", 200), 1, None, None);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_lines_round_trip_through_json() {
        let mut cart = Cart::new();
        cart.add(product("a", 199), 2, Some("Black".to_string()), Some("L".to_string()));

        let json = serde_json::to_string(cart.lines()).expect("serialize");
        let lines: Vec<CartLine> = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(Cart::from_lines(lines), cart);
    }
}
