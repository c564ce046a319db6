//! Newsletter subscriber management routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{info, instrument};

use glowella_core::types::SubscriberId;

use crate::api::types::Subscriber;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubscriberListBody {
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {}

/// GET /newsletter/subscribers
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<Json<Envelope<SubscriberListBody>>> {
    let subscribers = state.api().list_subscribers(&admin.token).await?;
    Ok(Envelope::ok(SubscriberListBody { subscribers }))
}

/// DELETE /newsletter/subscribers/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DeletedBody>>> {
    let id = SubscriberId::from(id);
    state.api().remove_subscriber(&admin.token, &id).await?;
    info!(%id, "newsletter subscriber removed");
    Ok(Envelope::ok(DeletedBody {}))
}
