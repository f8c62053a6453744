//! Admin product management route handlers.
//!
//! All handlers gate on the admin role. Mutations return the refreshed
//! product list so the client can replace its copy wholesale.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use loop_core::product::Product;

use crate::error::Result;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// GET /admin/products - the full, unfiltered product list.
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().get_products().await?))
}

/// POST /admin/products - create or update a product.
///
/// An empty or unknown identifier creates; a matching one updates.
#[instrument(skip(state, admin, product), fields(product_id = %product.id))]
pub async fn save(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(product): Json<Product>,
) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().save_product(product).await?;
    tracing::info!(admin_id = %admin.0.profile.id, "Product saved");
    Ok(Json(products))
}

/// DELETE /admin/products/{id} - delete a product.
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().delete_product(&id).await?;
    tracing::info!(admin_id = %admin.0.profile.id, product_id = %id, "Product deleted");
    Ok(Json(products))
}
