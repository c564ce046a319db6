//! Commerce API client for the admin back-office.
//!
//! Same `{code, message, ...payload}` envelope as the storefront surface,
//! but authenticated per request: every call carries the Bearer token the
//! admin obtained at login, so the client itself holds no credentials.

pub mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use glowella_core::bestsellers::SaleRecord;
use glowella_core::catalog::Product;
use glowella_core::pricing::{DiscountRule, DiscountScope};
use glowella_core::types::{DiscountId, NotificationId, OrderId, ProductId, SubscriberId};

use types::{
    DiscountPayload, DiscountsPayload, EmptyPayload, LoginPayload, LoginRequest, Notification,
    NotificationsPayload, Order, OrderPayload, OrdersPayload, ProductPayload, ProductsPayload,
    SalesPayload, Subscriber, SubscribersPayload,
};

/// Errors that can occur when talking to the Commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The envelope carried a non-200 code.
    #[error("API error: {code} - {message}")]
    Api { code: u16, message: String },

    /// Failed to decode the response body.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Envelope head shared by every Commerce API response.
#[derive(Debug, serde::Deserialize)]
struct EnvelopeHead {
    code: u16,
    #[serde(default)]
    message: Option<String>,
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let head: EnvelopeHead = serde_json::from_str(body)?;
    if head.code != 200 {
        return Err(ApiError::Api {
            code: head.code,
            message: head.message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Client for the Glowella Commerce API (admin surface).
///
/// Cheaply cloneable via `Arc`. No caching here: the back-office always
/// shows fresh data.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: url::Url,
}

impl AdminClient {
    /// Create a new admin Commerce API client.
    #[must_use]
    pub fn new(base_url: url::Url) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        self.inner.base_url.join(path).map_err(|e| ApiError::Api {
            code: 0,
            message: format!("invalid endpoint path {path}: {e}"),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .put(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    async fn delete<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.delete(url).bearer_auth(token).send().await?;
        Self::read_envelope(path, response).await
    }

    /// POST a multipart form (product create/update with image uploads).
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                path,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(ApiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}"),
            });
        }

        match decode_envelope(&body) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                if matches!(e, ApiError::Parse(_)) {
                    tracing::error!(
                        path,
                        error = %e,
                        body = %body.chars().take(500).collect::<String>(),
                        "Failed to decode Commerce API response"
                    );
                }
                Err(e)
            }
        }
    }

    const fn discounts_path(scope: DiscountScope) -> &'static str {
        match scope {
            DiscountScope::Product => "admin/discounts/product",
            DiscountScope::Delivery => "admin/discounts/delivery",
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate an admin and obtain a Bearer token.
    ///
    /// # Errors
    ///
    /// Bad credentials surface as `ApiError::Api { code: 401, .. }`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginPayload, ApiError> {
        let url = self.endpoint("admin/login")?;
        let response = self.inner.client.post(url).json(request).send().await?;
        Self::read_envelope("admin/login", response).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn list_products(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        let payload: ProductsPayload = self.get(token, "admin/products", &[]).await?;
        Ok(payload.products)
    }

    /// Create a product from a multipart form (fields plus image files).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token, form))]
    pub async fn create_product(
        &self,
        token: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Product, ApiError> {
        let payload: ProductPayload = self.post_multipart(token, "admin/products", form).await?;
        Ok(payload.product)
    }

    /// Update a product from a multipart form; a full replacement upstream.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token, form))]
    pub async fn update_product(
        &self,
        token: &str,
        id: &ProductId,
        form: reqwest::multipart::Form,
    ) -> Result<Product, ApiError> {
        let path = format!("admin/products/{}", urlencoding::encode(id.as_str()));
        let payload: ProductPayload = self.post_multipart(token, &path, form).await?;
        Ok(payload.product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: &ProductId) -> Result<(), ApiError> {
        let path = format!("admin/products/{}", urlencoding::encode(id.as_str()));
        let _: EmptyPayload = self.delete(token, &path).await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch orders, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn list_orders(
        &self,
        token: &str,
        status: Option<types::OrderStatus>,
    ) -> Result<Vec<Order>, ApiError> {
        let query = status
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();
        let payload: OrdersPayload = self.get(token, "admin/orders", &query).await?;
        Ok(payload.orders)
    }

    /// Fetch a single order by id.
    ///
    /// # Errors
    ///
    /// An unknown id surfaces as `ApiError::Api { code: 404, .. }`.
    #[instrument(skip(self, token))]
    pub async fn get_order(&self, token: &str, id: &OrderId) -> Result<Order, ApiError> {
        let path = format!("admin/orders/{}", urlencoding::encode(id.as_str()));
        let payload: OrderPayload = self.get(token, &path, &[]).await?;
        Ok(payload.order)
    }

    // =========================================================================
    // Discounts
    // =========================================================================

    /// Fetch all discount rules for a scope (active and inactive).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn list_discounts(
        &self,
        token: &str,
        scope: DiscountScope,
    ) -> Result<Vec<DiscountRule>, ApiError> {
        let payload: DiscountsPayload = self.get(token, Self::discounts_path(scope), &[]).await?;
        Ok(payload.discounts)
    }

    /// Create a discount rule. The caller validates the rule first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token, rule), fields(scope = %rule.scope))]
    pub async fn create_discount(
        &self,
        token: &str,
        rule: &DiscountRule,
    ) -> Result<DiscountRule, ApiError> {
        let payload: DiscountPayload = self
            .post(token, Self::discounts_path(rule.scope), rule)
            .await?;
        Ok(payload.discount)
    }

    /// Update a discount rule in place.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token, rule), fields(id = %rule.id, scope = %rule.scope))]
    pub async fn update_discount(
        &self,
        token: &str,
        rule: &DiscountRule,
    ) -> Result<DiscountRule, ApiError> {
        let path = format!(
            "{}/{}",
            Self::discounts_path(rule.scope),
            urlencoding::encode(rule.id.as_str())
        );
        let payload: DiscountPayload = self.put(token, &path, rule).await?;
        Ok(payload.discount)
    }

    /// Delete a discount rule.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn delete_discount(
        &self,
        token: &str,
        scope: DiscountScope,
        id: &DiscountId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "{}/{}",
            Self::discounts_path(scope),
            urlencoding::encode(id.as_str())
        );
        let _: EmptyPayload = self.delete(token, &path).await?;
        Ok(())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Fetch all notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn list_notifications(&self, token: &str) -> Result<Vec<Notification>, ApiError> {
        let payload: NotificationsPayload = self.get(token, "admin/notifications", &[]).await?;
        Ok(payload.notifications)
    }

    /// Mark a notification as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn mark_notification_read(
        &self,
        token: &str,
        id: &NotificationId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "admin/notifications/{}/read",
            urlencoding::encode(id.as_str())
        );
        let _: EmptyPayload = self.post(token, &path, &serde_json::json!({})).await?;
        Ok(())
    }

    // =========================================================================
    // Newsletter
    // =========================================================================

    /// Fetch the newsletter subscriber list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn list_subscribers(&self, token: &str) -> Result<Vec<Subscriber>, ApiError> {
        let payload: SubscribersPayload = self.get(token, "admin/subscribers", &[]).await?;
        Ok(payload.subscribers)
    }

    /// Remove a subscriber.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn remove_subscriber(&self, token: &str, id: &SubscriberId) -> Result<(), ApiError> {
        let path = format!("admin/subscribers/{}", urlencoding::encode(id.as_str()));
        let _: EmptyPayload = self.delete(token, &path).await?;
        Ok(())
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Fetch per-day sales records for the trailing `days` window.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self, token))]
    pub async fn sales_records(&self, token: &str, days: u64) -> Result<Vec<SaleRecord>, ApiError> {
        let payload: SalesPayload = self
            .get(token, "admin/sales", &[("days", days.to_string())])
            .await?;
        Ok(payload.sales_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_login() {
        let body = r#"{"code":200,"message":"success","token":"tok_abc","email":"ops@glowella.shop"}"#;
        let payload: LoginPayload = decode_envelope(body).expect("decodes");
        assert_eq!(payload.token, "tok_abc");
        assert_eq!(payload.email, "ops@glowella.shop");
    }

    #[test]
    fn test_decode_envelope_bad_credentials() {
        let body = r#"{"code":401,"message":"invalid credentials"}"#;
        let err = decode_envelope::<LoginPayload>(body).expect_err("must fail");
        assert!(matches!(err, ApiError::Api { code: 401, .. }));
    }

    #[test]
    fn test_decode_envelope_notifications() {
        let body = r#"{
            "code": 200,
            "message": "success",
            "notifications": [{
                "id": "n1",
                "title": "New order",
                "message": "Order #1042 was placed",
                "read": false,
                "createdAt": "2026-08-01T09:30:00Z"
            }]
        }"#;
        let payload: NotificationsPayload = decode_envelope(body).expect("decodes");
        assert_eq!(payload.notifications.len(), 1);
        let n = payload.notifications.first().expect("one notification");
        assert!(!n.read);
        assert_eq!(n.id, NotificationId::new("n1"));
    }
}
