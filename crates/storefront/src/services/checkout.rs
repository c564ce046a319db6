//! Checkout quoting.
//!
//! A quote combines the session cart's subtotal with the delivery fee for
//! the customer's state/LGA and the best applicable delivery discount. The
//! selection itself is pure; the route layer fetches the fee and the active
//! rules and the quote is computed over those in-memory copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use glowella_core::cart::Cart;
use glowella_core::pricing::{AppliedDiscount, DiscountRule, calculate_discount};
use glowella_core::types::Naira;

/// A priced checkout preview shown before payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub subtotal: Naira,
    pub delivery_fee: Naira,
    /// The applied delivery discount, when one qualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_discount: Option<AppliedDiscount>,
    pub total: Naira,
}

/// Compute a checkout quote.
///
/// Rules are considered in the order the API returned them; the first
/// active, in-window rule that applies to this customer wins (rules with a
/// first-time restriction are skipped for returning customers). With no
/// applicable rule the fee passes through untouched.
#[must_use]
pub fn quote(
    cart: &Cart,
    delivery_fee: Naira,
    delivery_rules: &[DiscountRule],
    first_time: bool,
    now: DateTime<Utc>,
) -> CheckoutQuote {
    let subtotal = cart.subtotal();

    let delivery_discount = delivery_rules
        .iter()
        .filter(|rule| rule.applies_to_customer(first_time))
        .find_map(|rule| calculate_discount(delivery_fee, rule, now));

    let effective_fee = delivery_discount
        .as_ref()
        .map_or(delivery_fee, |d| d.discounted_amount);

    CheckoutQuote {
        subtotal,
        delivery_fee,
        delivery_discount,
        total: subtotal + effective_fee,
    }
}
