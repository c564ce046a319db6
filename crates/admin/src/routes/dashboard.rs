//! Dashboard routes: best sellers and a sales volume summary.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use glowella_core::bestsellers::{self, BestSeller};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::state::AppState;

const DEFAULT_WINDOW_DAYS: u64 = 30;
const DEFAULT_LIMIT: usize = 8;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSellersBody {
    pub best_sellers: Vec<BestSeller>,
}

/// GET /dashboard/best-sellers
#[instrument(skip(state, admin))]
pub async fn best_sellers(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Envelope<BestSellersBody>>> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if days == 0 {
        return Err(AppError::BadRequest("days must be at least 1".to_string()));
    }

    let records = state.api().sales_records(&admin.token, days).await?;
    let products = state.api().list_products(&admin.token).await?;
    let best_sellers =
        bestsellers::top_sellers(&records, &products, days, limit, Utc::now().date_naive());

    Ok(Envelope::ok(BestSellersBody { best_sellers }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBody {
    pub days: u64,
    /// Days in the window that recorded at least one sale.
    pub active_days: usize,
    pub total_items_sold: u64,
}

/// GET /dashboard/summary
///
/// Volume only; revenue stays upstream where historical prices live.
#[instrument(skip(state, admin))]
pub async fn summary(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Envelope<SummaryBody>>> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days == 0 {
        return Err(AppError::BadRequest("days must be at least 1".to_string()));
    }

    let records = state.api().sales_records(&admin.token, days).await?;

    let mut active_days = 0;
    let mut total_items_sold: u64 = 0;
    for record in &records {
        match record.parse_items() {
            Ok(items) => {
                if !items.is_empty() {
                    active_days += 1;
                }
                total_items_sold += items
                    .iter()
                    .map(|item| u64::from(item.ordered_quantity))
                    .sum::<u64>();
            }
            Err(e) => {
                tracing::warn!(day = %record.day, error = %e, "skipping malformed sales record");
            }
        }
    }

    Ok(Envelope::ok(SummaryBody {
        days,
        active_days,
        total_items_sold,
    }))
}
