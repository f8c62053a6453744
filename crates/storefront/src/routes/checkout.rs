//! Checkout route handler.
//!
//! Payment is simulated with a fixed processing delay. The order is
//! written in two steps, header first and lines second, with no
//! transaction across them; a failed second step leaves the header in
//! place and reports failure to the client.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use loop_core::order::{Order, OrderLine, OrderStatus, ShippingAddress};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::routes::cart::load_cart;
use crate::state::AppState;
use crate::supabase::rows::{OrderInsertRow, OrderLineRow};

/// Simulated payment processing time.
const PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// Message shown to the customer on any order failure.
const ORDER_FAILED: &str = "Order failed! Please try again.";

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "shippingAddress")]
    pub shipping_address: ShippingAddress,
}

/// Response body for a placed order.
#[derive(Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// POST /checkout - place an order from the session cart.
#[instrument(skip(state, session, user, body))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let Some(supabase) = state.supabase() else {
        tracing::warn!("Checkout attempted without a hosted backend configured");
        return Err(AppError::Unavailable(ORDER_FAILED.to_string()));
    };

    tokio::time::sleep(PAYMENT_DELAY).await;

    let order = Order {
        id: String::new(),
        email: user.profile.email.clone(),
        total_amount: cart.total(),
        status: OrderStatus::Paid,
        shipping_address: body.shipping_address,
    };

    let order_id = match supabase.insert_order(&OrderInsertRow::from(&order)).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Order header insert failed");
            return Err(AppError::Unavailable(ORDER_FAILED.to_string()));
        }
    };

    let lines: Vec<OrderLineRow> = cart
        .lines()
        .iter()
        .map(|line| {
            OrderLineRow::from_line(
                &order_id,
                &OrderLine {
                    product_id: line.product.id.clone(),
                    quantity: line.quantity,
                    price_at_time: line.product.price,
                    selected_color: line.selected_color.clone(),
                    selected_size: line.selected_size.clone(),
                },
            )
        })
        .collect();

    // No rollback of the header if this fails; the order stays Paid with
    // no lines and the customer is told to retry.
    if let Err(e) = supabase.insert_order_lines(&lines).await {
        tracing::error!(error = %e, order_id = %order_id, "Order line insert failed");
        return Err(AppError::Unavailable(ORDER_FAILED.to_string()));
    }

    cart.clear();
    session
        .insert(crate::models::session_keys::CART, cart.lines())
        .await?;

    tracing::info!(order_id = %order_id, total = %order.total_amount, "Order placed");
    Ok(Json(CheckoutResponse { order_id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_parses_camel_case_address() {
        let body: CheckoutRequest = serde_json::from_str(
            r#"{
                "shippingAddress": {
                    "fullName": "Ada Lovelace",
                    "address": "1 Analytical Way",
                    "city": "London",
                    "zipCode": "N1 9GU",
                    "country": "UK"
                }
            }"#,
        )
        .expect("parse");
        assert_eq!(body.shipping_address.full_name, "Ada Lovelace");
        assert_eq!(body.shipping_address.zip_code, "N1 9GU");
    }

    #[test]
    fn test_checkout_response_shape() {
        let json = serde_json::to_value(CheckoutResponse {
            order_id: "o-1".to_string(),
        })
        .expect("serialize");
        assert_eq!(json["orderId"], "o-1");
    }
}
