//! Order listing and detail routes. Read-only; fulfilment actions live
//! upstream.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use glowella_core::types::OrderId;

use crate::api::types::{Order, OrderStatus};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
pub struct OrderListBody {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct OrderBody {
    pub order: Order,
}

/// GET /orders
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Envelope<OrderListBody>>> {
    let orders = state.api().list_orders(&admin.token, query.status).await?;
    Ok(Envelope::ok(OrderListBody { orders }))
}

/// GET /orders/{id}
#[instrument(skip(state, admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Envelope<OrderBody>>> {
    let order = state
        .api()
        .get_order(&admin.token, &OrderId::from(id))
        .await?;
    Ok(Envelope::ok(OrderBody { order }))
}
