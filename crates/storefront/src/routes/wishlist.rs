//! Session wishlist routes.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use glowella_core::types::ProductId;

use crate::error::Result;
use crate::models::session_keys;
use crate::routes::Envelope;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBody {
    pub product_ids: Vec<ProductId>,
}

async fn load_wishlist(session: &Session) -> Result<Vec<ProductId>> {
    Ok(session
        .get::<Vec<ProductId>>(session_keys::WISHLIST)
        .await?
        .unwrap_or_default())
}

/// GET /wishlist - the wishlisted product ids.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Envelope<WishlistBody>>> {
    let product_ids = load_wishlist(&session).await?;
    Ok(Envelope::ok(WishlistBody { product_ids }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBody {
    pub product_ids: Vec<ProductId>,
    /// True when the toggle added the product, false when it removed it.
    pub added: bool,
}

/// POST /wishlist/toggle - add or remove a product.
#[instrument(skip(session))]
pub async fn toggle(
    session: Session,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<Envelope<ToggleBody>>> {
    let mut product_ids = load_wishlist(&session).await?;

    let added = if product_ids.contains(&request.product_id) {
        product_ids.retain(|id| id != &request.product_id);
        false
    } else {
        product_ids.push(request.product_id);
        true
    };

    session.insert(session_keys::WISHLIST, &product_ids).await?;
    Ok(Envelope::ok(ToggleBody { product_ids, added }))
}
