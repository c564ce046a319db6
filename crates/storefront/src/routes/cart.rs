//! Session cart routes.
//!
//! The cart lives in the browser session; the Commerce API stays the price
//! authority, so `add` re-fetches the product and stores the server-side
//! price on the line regardless of what the client sent.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use glowella_core::cart::{Cart, CartLine};
use glowella_core::types::{Naira, ProductId};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::routes::Envelope;
use crate::state::AppState;

/// Cart contents plus derived totals, as returned to the SPA.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBody {
    pub lines: Vec<CartLine>,
    pub subtotal: Naira,
    pub item_count: u32,
}

impl CartBody {
    fn from_cart(cart: Cart) -> Self {
        Self {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            lines: cart.lines,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: u32,
}

/// Load the cart from the session, defaulting to empty.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_else(Cart::empty))
}

/// Persist the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// GET /cart - cart contents with totals.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Envelope<CartBody>>> {
    let cart = load_cart(&session).await?;
    Ok(Envelope::ok(CartBody::from_cart(cart)))
}

/// GET /cart/count - item count for the header badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<Envelope<CountBody>>> {
    let cart = load_cart(&session).await?;
    Ok(Envelope::ok(CountBody {
        count: cart.item_count(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// POST /cart/add - add a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddRequest>,
) -> Result<Json<Envelope<CartBody>>> {
    if request.quantity == 0 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = state.commerce().get_product(&request.product_id).await?;
    if product.available_qty == 0 {
        return Err(AppError::Validation(format!(
            "{} is out of stock",
            product.name
        )));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(CartLine {
        product_id: product.id,
        name: product.name,
        price: product.price,
        quantity: request.quantity,
        image: product.images.first().cloned(),
    });
    save_cart(&session, &cart).await?;

    Ok(Envelope::ok(CartBody::from_cart(cart)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// POST /cart/update - set a line's quantity; zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<Envelope<CartBody>>> {
    let mut cart = load_cart(&session).await?;
    if !cart.update_quantity(&request.product_id, request.quantity) {
        return Err(AppError::NotFound(format!(
            "product {} is not in the cart",
            request.product_id
        )));
    }
    save_cart(&session, &cart).await?;

    Ok(Envelope::ok(CartBody::from_cart(cart)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub product_id: ProductId,
}

/// POST /cart/remove - remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<Envelope<CartBody>>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&request.product_id);
    save_cart(&session, &cart).await?;

    Ok(Envelope::ok(CartBody::from_cart(cart)))
}

/// POST /cart/clear - empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<Envelope<CartBody>>> {
    let cart = Cart::empty();
    save_cart(&session, &cart).await?;
    Ok(Envelope::ok(CartBody::from_cart(cart)))
}
