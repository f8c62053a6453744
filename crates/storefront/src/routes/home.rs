//! Home route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use loop_core::product::{Category, Product};
use loop_core::seed;

use crate::error::Result;
use crate::state::AppState;

/// How many products the hero carousel cycles through.
const CAROUSEL_SIZE: usize = 8;

/// Home page payload.
#[derive(Serialize)]
pub struct HomeBody {
    pub featured: Vec<Product>,
    #[serde(rename = "bestSellers")]
    pub best_sellers: Vec<Product>,
    pub categories: Vec<Category>,
}

/// GET / - featured carousel products, best sellers, and category tiles.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<HomeBody>> {
    let products = state.catalog().get_products().await?;

    let featured: Vec<Product> = products.iter().take(CAROUSEL_SIZE).cloned().collect();
    let best_sellers: Vec<Product> = products
        .iter()
        .filter(|p| p.is_best_seller)
        .cloned()
        .collect();

    Ok(Json(HomeBody {
        featured,
        best_sellers,
        categories: seed::categories(),
    }))
}
