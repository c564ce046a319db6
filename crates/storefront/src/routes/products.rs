//! Product listing, detail, and best-seller routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use glowella_core::bestsellers::{self, BestSeller};
use glowella_core::catalog::{self, Product};
use glowella_core::types::{ProductId, SkinConcern};

use crate::error::{AppError, Result};
use crate::routes::Envelope;
use crate::state::AppState;

/// Default trailing window for best-sellers, in days.
const DEFAULT_BEST_SELLER_DAYS: u64 = 30;

/// Default number of best-sellers returned.
const DEFAULT_BEST_SELLER_LIMIT: usize = 8;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Category slug; `"all"` or absent means no category filter.
    pub category: Option<String>,
    /// Comma-separated skin concern slugs, e.g. `"acne,dry-skin"`.
    pub concerns: Option<String>,
    /// Free-text search over name, description, and category.
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductListBody {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub product: Product,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSellersBody {
    pub best_sellers: Vec<BestSeller>,
}

/// Parse the comma-separated `concerns` parameter.
///
/// Unknown slugs are a client error rather than a silent no-match.
fn parse_concerns(raw: &str) -> Result<Vec<SkinConcern>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            SkinConcern::from_str_param(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown skin concern: {s}")))
        })
        .collect()
}

/// GET /products - the filtered product listing.
///
/// Filters compose as AND across dimensions: a product must match the
/// category, at least one selected concern, and every search term.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<ProductListBody>>> {
    let concerns = match query.concerns.as_deref() {
        Some(raw) => parse_concerns(raw)?,
        None => Vec::new(),
    };

    let mut products = state.commerce().list_products().await?;

    if let Some(category) = query.category.as_deref() {
        products = catalog::filter_by_category(&products, category);
    }
    if !concerns.is_empty() {
        products.retain(|p| catalog::matches_concerns(p, &concerns));
    }
    if let Some(q) = query.q.as_deref() {
        products.retain(|p| catalog::matches_search(p, q));
    }

    Ok(Envelope::ok(ProductListBody { products }))
}

/// GET /products/{id} - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ProductBody>>> {
    let product = state.commerce().get_product(&ProductId::from(id)).await?;
    Ok(Envelope::ok(ProductBody { product }))
}

/// Query parameters for the best-sellers endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BestSellersQuery {
    pub days: Option<u64>,
    pub limit: Option<usize>,
}

/// GET /products/best-sellers - top sellers over a trailing window.
#[instrument(skip(state))]
pub async fn best_sellers(
    State(state): State<AppState>,
    Query(query): Query<BestSellersQuery>,
) -> Result<Json<Envelope<BestSellersBody>>> {
    let days = query.days.unwrap_or(DEFAULT_BEST_SELLER_DAYS);
    let limit = query.limit.unwrap_or(DEFAULT_BEST_SELLER_LIMIT);
    if days == 0 {
        return Err(AppError::BadRequest("days must be at least 1".to_string()));
    }

    let records = state.commerce().sales_records(days).await?;
    let products = state.commerce().list_products().await?;
    let best_sellers =
        bestsellers::top_sellers(&records, &products, days, limit, Utc::now().date_naive());

    Ok(Envelope::ok(BestSellersBody { best_sellers }))
}
