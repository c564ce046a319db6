//! Checkout routes.
//!
//! `quote` prices the session cart against the customer's delivery location
//! and any active delivery discounts; `initiate` hands the priced cart to the
//! Commerce API and clears the session cart only after the upstream call
//! succeeds, so a failed attempt leaves the cart intact.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument};
use uuid::Uuid;

use glowella_core::pricing::DiscountScope;

use crate::api::types::{CheckoutRequest, CheckoutSession, CustomerDetails};
use crate::error::{AppError, Result};
use crate::routes::Envelope;
use crate::routes::cart::{load_cart, save_cart};
use crate::routes::newsletter::is_valid_email;
use crate::services::checkout::{self, CheckoutQuote};
use crate::state::AppState;

/// Delivery location plus customer standing, enough to price a checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub state: String,
    pub lga: String,
    #[serde(default)]
    pub first_time: bool,
}

/// POST /checkout/quote - price preview for the session cart.
#[instrument(skip(state, session))]
pub async fn quote(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<Envelope<CheckoutQuote>>> {
    if request.state.trim().is_empty() || request.lga.trim().is_empty() {
        return Err(AppError::Validation(
            "state and lga are required".to_string(),
        ));
    }

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }

    let fee = state
        .commerce()
        .delivery_fee(request.state.trim(), request.lga.trim())
        .await?;
    let rules = state
        .commerce()
        .active_discounts(DiscountScope::Delivery)
        .await?;

    let quote = checkout::quote(&cart, fee, &rules, request.first_time, Utc::now());
    Ok(Envelope::ok(quote))
}

fn validate_customer(customer: &CustomerDetails) -> Result<()> {
    let required = [
        ("firstName", &customer.first_name),
        ("lastName", &customer.last_name),
        ("email", &customer.email),
        ("phone", &customer.phone),
        ("address", &customer.address),
        ("state", &customer.state),
        ("lga", &customer.lga),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }
    if !is_valid_email(&customer.email) {
        return Err(AppError::Validation(
            "email address is invalid".to_string(),
        ));
    }
    Ok(())
}

/// POST /checkout - initiate a checkout upstream.
#[instrument(skip(state, session, customer), fields(customer_state = %customer.state, lga = %customer.lga))]
pub async fn initiate(
    State(state): State<AppState>,
    session: Session,
    Json(customer): Json<CustomerDetails>,
) -> Result<Json<Envelope<CheckoutSession>>> {
    validate_customer(&customer)?;

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }

    let fee = state
        .commerce()
        .delivery_fee(customer.state.trim(), customer.lga.trim())
        .await?;
    let rules = state
        .commerce()
        .active_discounts(DiscountScope::Delivery)
        .await?;
    let quote = checkout::quote(&cart, fee, &rules, customer.first_time, Utc::now());

    let effective_fee = quote
        .delivery_discount
        .as_ref()
        .map_or(quote.delivery_fee, |d| d.discounted_amount);

    let request = CheckoutRequest {
        reference: Uuid::new_v4().to_string(),
        lines: cart.lines.clone(),
        customer,
        subtotal: quote.subtotal,
        delivery_fee: effective_fee,
        total: quote.total,
    };

    let checkout_session = state.commerce().initiate_checkout(&request).await?;

    // The upstream accepted the order; only now does the cart go away.
    save_cart(&session, &glowella_core::cart::Cart::empty()).await?;
    info!(
        order_id = %checkout_session.order_id,
        reference = %request.reference,
        "checkout initiated"
    );

    Ok(Envelope::ok(checkout_session))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+2348012345678".to_string(),
            address: "12 Marina Road".to_string(),
            state: "Lagos".to_string(),
            lga: "Ikeja".to_string(),
            first_time: true,
        }
    }

    #[test]
    fn test_validate_customer_accepts_complete_details() {
        assert!(validate_customer(&customer()).is_ok());
    }

    #[test]
    fn test_validate_customer_rejects_blank_fields() {
        let mut c = customer();
        c.lga = "  ".to_string();
        let err = validate_customer(&c).expect_err("must fail");
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("lga")));
    }

    #[test]
    fn test_validate_customer_rejects_bad_email() {
        let mut c = customer();
        c.email = "not-an-email".to_string();
        assert!(validate_customer(&c).is_err());
    }
}
