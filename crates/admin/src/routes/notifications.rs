//! Notification routes, backed by the optimistic mark-as-read service.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use glowella_core::types::NotificationId;

use crate::api::types::Notification;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::services::notifications::CommerceNotifications;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationListBody {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountBody {
    pub count: usize,
}

/// GET /notifications - fetch and refresh the cache.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<Json<Envelope<NotificationListBody>>> {
    let backend = CommerceNotifications {
        client: state.api(),
        token: &admin.token,
    };
    let notifications = state.notifications().list(&backend).await?;
    Ok(Envelope::ok(NotificationListBody { notifications }))
}

/// GET /notifications/unread-count - badge count from the cache only.
#[instrument(skip(state, _admin))]
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<Envelope<UnreadCountBody>>> {
    let count = state.notifications().unread_count().await;
    Ok(Envelope::ok(UnreadCountBody { count }))
}

/// POST /notifications/{id}/read - optimistic mark-as-read.
///
/// On upstream failure the service has already reconciled the cache back to
/// server truth; the error envelope tells the SPA to re-fetch.
#[instrument(skip(state, admin))]
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Envelope<NotificationListBody>>> {
    let backend = CommerceNotifications {
        client: state.api(),
        token: &admin.token,
    };
    let notifications = state
        .notifications()
        .mark_read(&backend, &NotificationId::from(id))
        .await?;
    Ok(Envelope::ok(NotificationListBody { notifications }))
}
