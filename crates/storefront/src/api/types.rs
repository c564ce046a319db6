//! Wire types for the Commerce API.
//!
//! Every response body carries the `{code, message, ...payload}` envelope;
//! the payload structs below declare only the fields each endpoint adds on
//! top of it (the envelope head is checked separately, and serde ignores the
//! rest).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use glowella_core::bestsellers::SaleRecord;
use glowella_core::cart::CartLine;
use glowella_core::catalog::Product;
use glowella_core::pricing::DiscountRule;
use glowella_core::types::{BookingId, Naira, OrderId};

// =============================================================================
// Response payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub product: Product,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPayload {
    pub sales_records: Vec<SaleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DiscountsPayload {
    pub discounts: Vec<DiscountRule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeePayload {
    pub fee: Naira,
}

/// Payload of a successful checkout initiation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub order_id: OrderId,
    /// Where the SPA sends the customer to complete payment.
    pub payment_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SlotsPayload {
    pub slots: Vec<ConsultationSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationSlot {
    /// Slot start in "HH:MM" 24-hour form, as the API reports it.
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub booking_id: BookingId,
}

/// Empty payload for endpoints that return only the envelope head.
#[derive(Debug, Deserialize)]
pub struct EmptyPayload {}

// =============================================================================
// Request bodies
// =============================================================================

/// Checkout initiation request sent upstream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Client-generated idempotency reference for this checkout attempt.
    pub reference: String,
    pub lines: Vec<CartLine>,
    pub customer: CustomerDetails,
    pub subtotal: Naira,
    pub delivery_fee: Naira,
    pub total: Naira,
}

/// Customer/delivery details collected by the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub state: String,
    pub lga: String,
    #[serde(default)]
    pub first_time: bool,
}

/// Consultation booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    /// Slot start in "HH:MM" form, matching [`ConsultationSlot::time`].
    pub time: String,
    #[serde(default)]
    pub note: Option<String>,
}
