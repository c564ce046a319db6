//! Discount rule CRUD routes.
//!
//! Rules are validated locally (percent range, validity window) before any
//! network call; the Commerce API re-validates and owns the stored copy.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{info, instrument};

use glowella_core::pricing::{DiscountRule, DiscountScope};
use glowella_core::types::DiscountId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DiscountListBody {
    pub discounts: Vec<DiscountRule>,
}

#[derive(Debug, Serialize)]
pub struct DiscountBody {
    pub discount: DiscountRule,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {}

fn parse_scope(raw: &str) -> Result<DiscountScope> {
    match raw {
        "product" => Ok(DiscountScope::Product),
        "delivery" => Ok(DiscountScope::Delivery),
        other => Err(AppError::BadRequest(format!(
            "unknown discount scope: {other}"
        ))),
    }
}

fn validated(rule: DiscountRule, scope: DiscountScope) -> Result<DiscountRule> {
    if rule.scope != scope {
        return Err(AppError::BadRequest(
            "rule scope does not match the path".to_string(),
        ));
    }
    rule.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(rule)
}

/// GET /discounts/{scope}
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(scope): Path<String>,
) -> Result<Json<Envelope<DiscountListBody>>> {
    let scope = parse_scope(&scope)?;
    let discounts = state.api().list_discounts(&admin.token, scope).await?;
    Ok(Envelope::ok(DiscountListBody { discounts }))
}

/// POST /discounts/{scope} - create a rule. The upstream assigns the id.
#[instrument(skip(state, admin, rule))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(scope): Path<String>,
    Json(rule): Json<DiscountRule>,
) -> Result<Json<Envelope<DiscountBody>>> {
    let scope = parse_scope(&scope)?;
    let rule = validated(rule, scope)?;

    let discount = state.api().create_discount(&admin.token, &rule).await?;
    info!(id = %discount.id, %scope, "discount rule created");
    Ok(Envelope::ok(DiscountBody { discount }))
}

/// PUT /discounts/{scope}/{id} - update a rule in place.
#[instrument(skip(state, admin, rule))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path((scope, id)): Path<(String, String)>,
    Json(mut rule): Json<DiscountRule>,
) -> Result<Json<Envelope<DiscountBody>>> {
    let scope = parse_scope(&scope)?;
    // The path id wins over whatever the body carries.
    rule.id = DiscountId::from(id);
    let rule = validated(rule, scope)?;

    let discount = state.api().update_discount(&admin.token, &rule).await?;
    info!(id = %discount.id, %scope, "discount rule updated");
    Ok(Envelope::ok(DiscountBody { discount }))
}

/// DELETE /discounts/{scope}/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path((scope, id)): Path<(String, String)>,
) -> Result<Json<Envelope<DeletedBody>>> {
    let scope = parse_scope(&scope)?;
    let id = DiscountId::from(id);
    state.api().delete_discount(&admin.token, scope, &id).await?;
    info!(%id, %scope, "discount rule deleted");
    Ok(Envelope::ok(DeletedBody {}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn rule(percent: i64, scope: DiscountScope) -> DiscountRule {
        DiscountRule {
            id: DiscountId::new("d1"),
            scope,
            category: None,
            percent: Decimal::from(percent),
            valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid"),
            valid_to: NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid"),
            first_time_only: false,
            active: true,
        }
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope("product").expect("ok"), DiscountScope::Product);
        assert_eq!(
            parse_scope("delivery").expect("ok"),
            DiscountScope::Delivery
        );
        assert!(parse_scope("shipping").is_err());
    }

    #[test]
    fn test_validated_rejects_out_of_range_percent() {
        let err = validated(rule(150, DiscountScope::Product), DiscountScope::Product)
            .expect_err("must fail");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validated_rejects_scope_mismatch() {
        let err = validated(rule(10, DiscountScope::Product), DiscountScope::Delivery)
            .expect_err("must fail");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_validated_accepts_good_rule() {
        assert!(validated(rule(10, DiscountScope::Delivery), DiscountScope::Delivery).is_ok());
    }
}
