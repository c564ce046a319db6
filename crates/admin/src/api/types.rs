//! Wire types for the Commerce API admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use glowella_core::bestsellers::SaleRecord;
use glowella_core::cart::CartLine;
use glowella_core::catalog::Product;
use glowella_core::pricing::DiscountRule;
use glowella_core::types::{Naira, NotificationId, OrderId, SubscriberId};

// =============================================================================
// Orders
// =============================================================================

/// Order lifecycle states, owned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// An order as the Commerce API reports it to the back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub reference: String,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: String,
    pub state: String,
    pub lga: String,
    pub lines: Vec<CartLine>,
    pub subtotal: Naira,
    pub delivery_fee: Naira,
    pub total: Naira,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// A back-office notification (new order, low stock, booking, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Newsletter
// =============================================================================

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

// =============================================================================
// Response payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub struct OrdersPayload {
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub struct DiscountsPayload {
    pub discounts: Vec<DiscountRule>,
}

#[derive(Debug, Deserialize)]
pub struct DiscountPayload {
    pub discount: DiscountRule,
}

#[derive(Debug, Deserialize)]
pub struct NotificationsPayload {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribersPayload {
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPayload {
    pub sales_records: Vec<SaleRecord>,
}

/// Empty payload for endpoints that return only the envelope head.
#[derive(Debug, Deserialize)]
pub struct EmptyPayload {}

// =============================================================================
// Request bodies
// =============================================================================

/// Admin login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
