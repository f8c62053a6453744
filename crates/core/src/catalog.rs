//! Catalog view logic: filter/sort predicates and carousel bookkeeping.
//!
//! Pure derivations from (product list, filter state, sort selection) to an
//! ordered list. Recomputed from scratch whenever inputs change; there is
//! no incremental or indexed search.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Transient view state for the listing page. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against name, category, and
    /// description.
    pub search: String,
    /// Selected category id; empty string means no category filter.
    pub category: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            min_price: Decimal::ZERO,
            max_price: Decimal::MAX,
        }
    }
}

impl FilterState {
    /// Whether a product passes the search, category, and price filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.to_lowercase();
        let match_search = product.name.to_lowercase().contains(&search)
            || product.category.to_lowercase().contains(&search)
            || product.description.to_lowercase().contains(&search);
        let match_category = self.category.is_empty() || product.category == self.category;
        let match_price = product.price >= self.min_price && product.price <= self.max_price;

        match_search && match_category && match_price
    }
}

/// Sort policy for the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Best-sellers first, otherwise stable.
    #[default]
    Featured,
    /// Strictly by price ascending.
    #[serde(rename = "low")]
    PriceLowToHigh,
    /// Strictly by price descending.
    #[serde(rename = "high")]
    PriceHighToLow,
}

/// Filter then sort a product list for display.
#[must_use]
pub fn apply(products: &[Product], filters: &FilterState, sort: SortOrder) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| filters.matches(product))
        .cloned()
        .collect();

    match sort {
        SortOrder::Featured => filtered.sort_by_key(|product| !product.is_best_seller),
        SortOrder::PriceLowToHigh => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHighToLow => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    filtered
}

/// Next slide index for the best-seller carousel, wrapping at the end.
#[must_use]
pub const fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Previous slide index for the best-seller carousel, wrapping at the start.
#[must_use]
pub const fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + len - 1) % len }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str, price: i64, best_seller: bool) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::from(price),
            category: category.to_string(),
            image: String::new(),
            is_best_seller: best_seller,
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

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Beats Solo Wireless", "earphones", 199, true),
            product("2", "MacBook Pro M3 Max", "laptops", 3499, true),
            product("3", "Dell XPS 15", "laptops", 1899, false),
            product("4", "Echo Studio Pro", "speakers", 249, true),
            product("5", "Sony WH-1000XM5", "earphones", 349, false),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filters = FilterState::default();
        let result = apply(&catalog(), &filters, SortOrder::Featured);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filters = FilterState {
            search: "MACBOOK".to_string(),
            ..FilterState::default()
        };
        let result = apply(&catalog(), &filters, SortOrder::Featured);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");

        // Category text is searched too
        let filters = FilterState {
            search: "speaker".to_string(),
            ..FilterState::default()
        };
        let result = apply(&catalog(), &filters, SortOrder::Featured);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "4");
    }

    #[test]
    fn test_category_and_search_combine() {
        let filters = FilterState {
            search: "pro".to_string(),
            category: "laptops".to_string(),
            ..FilterState::default()
        };
        let result = apply(&catalog(), &filters, SortOrder::Featured);
        // Only laptop-category products whose text contains "pro"
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "MacBook Pro M3 Max");
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filters = FilterState {
            min_price: Decimal::from(199),
            max_price: Decimal::from(349),
            ..FilterState::default()
        };
        let result = apply(&catalog(), &filters, SortOrder::PriceLowToHigh);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "4", "5"]);
    }

    #[test]
    fn test_sort_low_and_high_are_reversed() {
        let low = apply(&catalog(), &FilterState::default(), SortOrder::PriceLowToHigh);
        let mut high = apply(&catalog(), &FilterState::default(), SortOrder::PriceHighToLow);
        high.reverse();

        let low_prices: Vec<Decimal> = low.iter().map(|p| p.price).collect();
        let high_prices: Vec<Decimal> = high.iter().map(|p| p.price).collect();
        assert_eq!(low_prices, high_prices);
        assert!(low_prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_featured_puts_best_sellers_first_stably() {
        let result = apply(&catalog(), &FilterState::default(), SortOrder::Featured);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        // Best-sellers keep their relative order, then the rest in order
        assert_eq!(ids, ["1", "2", "4", "3", "5"]);
    }

    #[test]
    fn test_sort_order_parses_from_query_values() {
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"featured\"").expect("parse"),
            SortOrder::Featured
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"low\"").expect("parse"),
            SortOrder::PriceLowToHigh
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"high\"").expect("parse"),
            SortOrder::PriceHighToLow
        );
    }

    #[test]
    fn test_carousel_indices_wrap() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(1, 3), 0);
    }

    #[test]
    fn test_carousel_empty_set_stays_at_zero() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(prev_index(0, 0), 0);
    }
}
