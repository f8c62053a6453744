//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                        - Home payload (featured, best sellers, categories)
//! GET    /health                  - Health check
//! GET    /health/ready            - Readiness check
//!
//! # Products
//! GET    /products                - Product listing with filters and sort
//! GET    /products/{id}           - Product detail
//! POST   /products/{id}/chat      - Product assistant
//!
//! # Cart (session-backed)
//! GET    /cart                    - Cart contents
//! POST   /cart/add                - Add to cart
//! POST   /cart/update             - Adjust line quantity
//! POST   /cart/remove             - Remove a line
//! POST   /cart/clear              - Empty the cart
//! GET    /cart/count              - Cart badge count
//!
//! # Checkout (requires auth)
//! POST   /checkout                - Place an order from the cart
//!
//! # Auth
//! POST   /auth/register           - Create an account
//! POST   /auth/login              - Sign in
//! POST   /auth/logout             - Sign out
//! GET    /auth/me                 - Current session user
//!
//! # Admin (requires admin role)
//! GET    /admin/products          - Full product list
//! POST   /admin/products          - Create or update a product
//! DELETE /admin/products/{id}     - Delete a product
//! ```

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/chat", post(assistant::chat))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(admin::list).post(admin::save))
        .route("/products/{id}", delete(admin::remove))
}

/// Create all routes for the storefront.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/checkout", post(checkout::place_order))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}
