//! Best-seller aggregation over daily sale records.
//!
//! The Commerce API reports sales as one record per day whose `products_sold`
//! field is a JSON-encoded list of product/quantity pairs. Ranking sums the
//! quantities per product across a trailing calendar-day window and joins the
//! winners back to the full product records.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// One product/quantity pair inside a sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldItem {
    pub product_id: ProductId,
    pub ordered_quantity: u32,
}

/// A per-day sales record, read-only from the client's perspective.
///
/// `products_sold` stays JSON-encoded exactly as the API delivers it; it is
/// parsed lazily during aggregation so one malformed record cannot poison
/// the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub day: NaiveDate,
    pub products_sold: String,
}

impl SaleRecord {
    /// Decode the JSON-encoded product/quantity list.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error when `products_sold` is not a
    /// valid JSON list of sold items.
    pub fn parse_items(&self) -> Result<Vec<SoldItem>, serde_json::Error> {
        serde_json::from_str(&self.products_sold)
    }
}

/// A product ranked by summed ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    #[serde(flatten)]
    pub product: Product,
    pub quantity_sold: u64,
}

/// Rank the top `limit` products by quantity sold within the trailing
/// `window_days`-day window ending `today`.
///
/// Malformed `products_sold` payloads are skipped with a warn log. Product
/// ids with no matching product record are dropped from the result and also
/// logged at warn, since they point at a data-integrity problem upstream.
/// Ties in quantity break by product id so results are deterministic.
#[must_use]
pub fn top_sellers(
    records: &[SaleRecord],
    products: &[Product],
    window_days: u64,
    limit: usize,
    today: NaiveDate,
) -> Vec<BestSeller> {
    let window_start = today
        .checked_sub_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MIN);

    let mut totals: HashMap<ProductId, u64> = HashMap::new();
    for record in records {
        if record.day < window_start || record.day > today {
            continue;
        }
        match record.parse_items() {
            Ok(items) => {
                for item in items {
                    *totals.entry(item.product_id).or_insert(0) +=
                        u64::from(item.ordered_quantity);
                }
            }
            Err(e) => {
                tracing::warn!(day = %record.day, error = %e, "skipping malformed sale record");
            }
        }
    }

    let mut ranked: Vec<(ProductId, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);

    let by_id: HashMap<&ProductId, &Product> = products.iter().map(|p| (&p.id, p)).collect();

    ranked
        .into_iter()
        .filter_map(|(product_id, quantity_sold)| match by_id.get(&product_id) {
            Some(product) => Some(BestSeller {
                product: (*product).clone(),
                quantity_sold,
            }),
            None => {
                tracing::warn!(
                    %product_id,
                    quantity_sold,
                    "sale record references unknown product; dropping from ranking"
                );
                None
            }
        })
        .collect()
}
