//! Cart route handlers.
//!
//! The cart lives in the session and is replayed through the cart engine
//! on every mutation. Handlers return the full cart payload so the client
//! never derives totals itself.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use loop_core::cart::{Cart, CartLine};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart payload returned by every cart mutation.
#[derive(Serialize)]
pub struct CartBody {
    pub items: Vec<CartLine>,
    #[serde(rename = "cartCount")]
    pub cart_count: u32,
    #[serde(rename = "cartTotal", with = "rust_decimal::serde::str")]
    pub cart_total: rust_decimal::Decimal,
    #[serde(rename = "cartOpen")]
    pub cart_open: bool,
}

impl CartBody {
    fn from_cart(cart: Cart, cart_open: bool) -> Self {
        Self {
            cart_count: cart.count(),
            cart_total: cart.total(),
            items: cart.into_lines(),
            cart_open,
        }
    }
}

/// Load the cart from the session.
///
/// A missing or unreadable entry yields an empty cart; stale payloads are
/// logged and dropped rather than failing the request.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Vec<CartLine>>(session_keys::CART).await {
        Ok(Some(lines)) => Cart::from_lines(lines),
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable cart from session");
            Cart::new()
        }
    }
}

/// Persist the cart back to the session.
async fn store_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart.lines())
        .await
        .map_err(AppError::from)
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(default)]
    pub quantity: u32,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Request body for updating or removing a cart line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(default)]
    pub delta: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// GET /cart - current cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartBody>> {
    let cart = load_cart(&session).await;
    Ok(Json(CartBody::from_cart(cart, false)))
}

/// POST /cart/add - add a product, merging on (id, color, size).
///
/// The response flags the cart drawer open so the client can reveal it.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddRequest>,
) -> Result<Json<CartBody>> {
    let product = state
        .catalog()
        .get_product_by_id(&body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    // A zero quantity from the client still means "add one"
    let quantity = body.quantity.max(1);

    let mut cart = load_cart(&session).await;
    cart.add(product, quantity, body.color, body.size);
    store_cart(&session, &cart).await?;

    Ok(Json(CartBody::from_cart(cart, true)))
}

/// POST /cart/update - adjust a line's quantity by a signed delta.
///
/// A decrement that would reach zero is ignored; removal is explicit.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(body): Json<LineRequest>) -> Result<Json<CartBody>> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(
        &body.product_id,
        body.delta,
        body.color.as_deref(),
        body.size.as_deref(),
    );
    store_cart(&session, &cart).await?;

    Ok(Json(CartBody::from_cart(cart, false)))
}

/// POST /cart/remove - drop a line entirely.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(body): Json<LineRequest>) -> Result<Json<CartBody>> {
    let mut cart = load_cart(&session).await;
    cart.remove(
        &body.product_id,
        body.color.as_deref(),
        body.size.as_deref(),
    );
    store_cart(&session, &cart).await?;

    Ok(Json(CartBody::from_cart(cart, false)))
}

/// POST /cart/clear - empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartBody>> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    store_cart(&session, &cart).await?;

    Ok(Json(CartBody::from_cart(cart, false)))
}

/// GET /cart/count - badge count only.
#[instrument(skip(session))]
pub async fn count(session: Session) -> (StatusCode, Json<serde_json::Value>) {
    let cart = load_cart(&session).await;
    (StatusCode::OK, Json(json!({ "count": cart.count() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_core::seed;

    #[test]
    fn test_cart_body_shape() {
        let mut cart = Cart::new();
        cart.add(seed::initial_products().remove(0), 2, None, None);

        let body = CartBody::from_cart(cart, true);
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["cartCount"], 2);
        assert_eq!(json["cartOpen"], true);
        assert!(json["cartTotal"].is_string());
        assert_eq!(json["items"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_add_request_quantity_defaults_to_zero_then_clamped() {
        let body: AddRequest =
            serde_json::from_str(r#"{ "productId": "1" }"#).expect("parse");
        assert_eq!(body.quantity, 0);
        assert_eq!(body.quantity.max(1), 1);
    }
}
