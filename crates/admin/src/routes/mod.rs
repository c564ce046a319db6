//! HTTP route handlers for the admin back-office.
//!
//! Everything except `/auth/login` requires a logged-in admin (the
//! `RequireAdminAuth` extractor); the session holds the upstream Bearer
//! token and every handler replays it.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//!
//! # Auth
//! POST /auth/login                    - Exchange credentials for a session
//! POST /auth/logout                   - Destroy the session
//!
//! # Dashboard
//! GET  /dashboard/best-sellers        - Top sellers over a trailing window
//! GET  /dashboard/summary             - Sales volume summary
//!
//! # Products
//! GET    /products                    - Product listing
//! POST   /products                    - Create (multipart, with images)
//! POST   /products/{id}               - Update (multipart, full replacement)
//! DELETE /products/{id}               - Delete
//!
//! # Orders
//! GET  /orders                        - Order listing (optional status filter)
//! GET  /orders/{id}                   - Order detail
//!
//! # Discounts
//! GET    /discounts/{scope}           - Rules for a scope (product|delivery)
//! POST   /discounts/{scope}           - Create a rule
//! PUT    /discounts/{scope}/{id}      - Update a rule
//! DELETE /discounts/{scope}/{id}      - Delete a rule
//!
//! # Notifications
//! GET  /notifications                 - Notification list (refreshes cache)
//! GET  /notifications/unread-count    - Unread badge count (cache only)
//! POST /notifications/{id}/read       - Optimistic mark-as-read
//!
//! # Newsletter
//! GET    /newsletter/subscribers      - Subscriber list
//! DELETE /newsletter/subscribers/{id} - Remove a subscriber
//! ```

pub mod auth;
pub mod dashboard;
pub mod discounts;
pub mod newsletter;
pub mod notifications;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    routing::{delete, get, post, put},
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

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/best-sellers", get(dashboard::best_sellers))
        .route("/summary", get(dashboard::summary))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", post(products::update).delete(products::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the discount routes router.
pub fn discount_routes() -> Router<AppState> {
    Router::new()
        .route("/{scope}", get(discounts::index).post(discounts::create))
        .route(
            "/{scope}/{id}",
            put(discounts::update).delete(discounts::remove),
        )
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::index))
        .route("/unread-count", get(notifications::unread_count))
        .route("/{id}/read", post(notifications::mark_read))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribers", get(newsletter::index))
        .route("/subscribers/{id}", delete(newsletter::remove))
}

/// Create all routes for the admin back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/discounts", discount_routes())
        .nest("/notifications", notification_routes())
        .nest("/newsletter", newsletter_routes())
}
