//! Discount rules and the discount calculator.
//!
//! A discount rule is a percentage reduction on either a product price or a
//! computed delivery fee, bounded by a validity window and optionally
//! restricted to first-time customers. The authoritative copy of every rule
//! lives server-side; this module evaluates an ephemeral read copy against a
//! base amount.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DiscountId, Naira};

/// What a discount rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountScope {
    /// Reduces a product's price.
    Product,
    /// Reduces the computed shipping fee.
    Delivery,
}

impl std::fmt::Display for DiscountScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "Product"),
            Self::Delivery => write!(f, "Delivery"),
        }
    }
}

/// A percentage discount with a validity window.
///
/// Invariants (enforced by [`DiscountRule::validate`]):
/// `valid_from <= valid_to` and `percent` within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    pub id: DiscountId,
    pub scope: DiscountScope,
    /// Restricts the rule to one product category; `None` means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub percent: Decimal,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    #[serde(default)]
    pub first_time_only: bool,
    #[serde(default)]
    pub active: bool,
}

/// Why a rule failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("percent must be between 0 and 100, got {0}")]
    PercentOutOfRange(Decimal),
    #[error("valid_from {from} is after valid_to {to}")]
    InvertedWindow { from: NaiveDate, to: NaiveDate },
}

impl DiscountRule {
    /// Check the rule invariants.
    ///
    /// Called at the admin edge before a rule is created or updated, so an
    /// over-100 percent can never reach the calculator through our own
    /// forms. Rules arriving from the API are re-checked by
    /// [`calculate_discount`] anyway.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the percent is outside `[0, 100]` or the
    /// validity window is inverted.
    pub fn validate(&self) -> Result<(), RuleError> {
        if !percent_in_range(self.percent) {
            return Err(RuleError::PercentOutOfRange(self.percent));
        }
        if self.valid_from > self.valid_to {
            return Err(RuleError::InvertedWindow {
                from: self.valid_from,
                to: self.valid_to,
            });
        }
        Ok(())
    }

    /// Is the rule within its validity window at `now`?
    ///
    /// `valid_to` is treated as end-of-day (23:59:59.999), so the comparison
    /// happens on calendar dates.
    #[must_use]
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        today >= self.valid_from && today <= self.valid_to
    }

    /// Does the rule apply to this customer?
    ///
    /// Rules marked `first_time_only` are reserved for first-time customers.
    #[must_use]
    pub const fn applies_to_customer(&self, first_time: bool) -> bool {
        !self.first_time_only || first_time
    }

    /// Does the rule apply to a product in this category?
    #[must_use]
    pub fn applies_to_category(&self, category: &str) -> bool {
        match &self.category {
            None => true,
            Some(c) => c.eq_ignore_ascii_case(category) || c.eq_ignore_ascii_case("all"),
        }
    }
}

/// The outcome of applying a discount rule to a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub original_amount: Naira,
    pub discounted_amount: Naira,
    pub percent: Decimal,
    pub savings: Naira,
}

/// Apply a discount rule to a base amount at a point in time.
///
/// Returns `None` when the rule is inactive, outside its validity window, or
/// carries an out-of-range percent (logged at warn; an over-100 percent would
/// otherwise over-discount past zero). Otherwise the discounted amount is
/// `original * (1 - percent/100)`, clamped at zero.
#[must_use]
pub fn calculate_discount(
    amount: Naira,
    rule: &DiscountRule,
    now: DateTime<Utc>,
) -> Option<AppliedDiscount> {
    if !rule.active {
        return None;
    }
    if !rule.in_window(now) {
        return None;
    }
    if !percent_in_range(rule.percent) {
        tracing::warn!(
            rule_id = %rule.id,
            percent = %rule.percent,
            "discount rule has out-of-range percent; ignoring"
        );
        return None;
    }

    let factor = Decimal::ONE - rule.percent / Decimal::ONE_HUNDRED;
    let discounted = amount.scaled(factor);

    Some(AppliedDiscount {
        original_amount: amount,
        discounted_amount: discounted,
        percent: rule.percent,
        savings: amount.saturating_sub(discounted),
    })
}

fn percent_in_range(percent: Decimal) -> bool {
    percent >= Decimal::ZERO && percent <= Decimal::ONE_HUNDRED
}
