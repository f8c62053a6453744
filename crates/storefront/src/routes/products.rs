//! Product listing and detail route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use loop_core::catalog::{self, FilterState, SortOrder};
use loop_core::product::Product;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ListQuery {
    fn filters(&self) -> FilterState {
        let defaults = FilterState::default();
        FilterState {
            search: self.search.clone(),
            category: self.category.clone(),
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
        }
    }
}

/// GET /products - filtered and sorted product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().get_products().await?;
    Ok(Json(catalog::apply(&products, &query.filters(), query.sort)))
}

/// GET /products/{id} - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get_product_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults_widen_price_range() {
        let query = ListQuery::default();
        let filters = query.filters();
        assert_eq!(filters.min_price, Decimal::ZERO);
        assert_eq!(filters.max_price, Decimal::MAX);
        assert!(filters.search.is_empty());
    }

    #[test]
    fn test_list_query_parses_sort_values() {
        let query: ListQuery =
            serde_urlencoded::from_str("search=pro&sort=low").expect("parse");
        assert_eq!(query.sort, SortOrder::PriceLowToHigh);
        assert_eq!(query.search, "pro");

        let query: ListQuery = serde_urlencoded::from_str("").expect("parse");
        assert_eq!(query.sort, SortOrder::Featured);
    }
}
