//! HTTP route handlers for the storefront.
//!
//! Every endpoint speaks JSON and wraps its payload in the same
//! `{code, message, ...payload}` envelope the Commerce API uses, so the SPA
//! has one response shape to handle.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (pings the Commerce API)
//!
//! # Products
//! GET  /products                  - Product listing (category/concerns/q filters)
//! GET  /products/best-sellers     - Top sellers in a trailing window
//! GET  /products/{id}             - Product detail
//!
//! # Cart (session-backed)
//! GET  /cart                      - Cart contents with totals
//! GET  /cart/count                - Item count badge
//! POST /cart/add                  - Add a product
//! POST /cart/update               - Set a line quantity (0 removes)
//! POST /cart/remove               - Remove a line
//! POST /cart/clear                - Empty the cart
//!
//! # Wishlist (session-backed)
//! GET  /wishlist                  - Wishlisted product ids
//! POST /wishlist/toggle           - Toggle a product
//!
//! # Checkout
//! POST /checkout/quote            - Price preview (fee + delivery discount)
//! POST /checkout                  - Initiate checkout upstream
//!
//! # Newsletter
//! POST /newsletter/subscribe      - Subscribe an email
//! POST /newsletter/unsubscribe    - Unsubscribe an email
//!
//! # Consultations
//! GET  /consultation/slots        - Slots for a date
//! POST /consultation/book         - Book a slot
//! ```

pub mod cart;
pub mod checkout;
pub mod consultation;
pub mod newsletter;
pub mod products;
pub mod wishlist;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope mirroring the Commerce API response shape.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: u16,
    pub message: &'static str,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a payload in a `code: 200` envelope.
    pub fn ok(payload: T) -> Json<Self> {
        Json(Self {
            code: 200,
            message: "success",
            payload,
        })
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/best-sellers", get(products::best_sellers))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::initiate))
        .route("/quote", post(checkout::quote))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
}

/// Create the consultation routes router.
pub fn consultation_routes() -> Router<AppState> {
    Router::new()
        .route("/slots", get(consultation::slots))
        .route("/book", post(consultation::book))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/checkout", checkout_routes())
        .nest("/newsletter", newsletter_routes())
        .nest("/consultation", consultation_routes())
}
