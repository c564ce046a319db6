//! Commerce API client for the storefront.
//!
//! Plain REST over `reqwest`. Every response carries a
//! `{code, message, ...payload}` envelope where `code == 200` is the sole
//! success signal; any other code, a transport error, or an undecodable body
//! becomes an [`ApiError`]. The product catalog is cached with `moka`
//! (5-minute TTL).

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use glowella_core::bestsellers::SaleRecord;
use glowella_core::catalog::Product;
use glowella_core::pricing::{DiscountRule, DiscountScope};
use glowella_core::types::{Naira, ProductId};

use crate::config::CommerceApiConfig;
use types::{
    BookingPayload, BookingRequest, CheckoutRequest, CheckoutSession, ConsultationSlot,
    DeliveryFeePayload, DiscountsPayload, EmptyPayload, ProductPayload, ProductsPayload,
    SalesPayload, SlotsPayload,
};

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

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

/// Decode a Commerce API response body.
///
/// Checks the `{code, message}` envelope head first; `code == 200` is the
/// only success signal. Only then is the payload decoded.
///
/// # Errors
///
/// Returns `ApiError::Api` for a non-200 envelope code and
/// `ApiError::Parse` when the body or payload cannot be decoded.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let head: EnvelopeHead = serde_json::from_str(body)?;
    if head.code != 200 {
        return Err(ApiError::Api {
            code: head.code,
            message: head.message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Cache keys for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Product(ProductId),
}

/// Cached catalog values.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
}

/// Client for the Glowella Commerce API (storefront surface).
///
/// Cheaply cloneable via `Arc`; products are cached for 5 minutes.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CommerceClient {
    /// Create a new Commerce API client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: config.token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        self.inner.base_url.join(path).map_err(|e| ApiError::Api {
            code: 0,
            message: format!("invalid endpoint path {path}: {e}"),
        })
    }

    /// Execute a GET request and decode its envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(&self.inner.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::decode_checked(path, status, &body)
    }

    /// Execute a POST request with a JSON body and decode its envelope.
    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(&self.inner.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::decode_checked(path, status, &body)
    }

    fn decode_checked<T: DeserializeOwned>(
        path: &str,
        status: reqwest::StatusCode,
        body: &str,
    ) -> Result<T, ApiError> {
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

        match decode_envelope(body) {
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

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product list (cached for 5 minutes).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("product list served from cache");
            return Ok(products);
        }

        let payload: ProductsPayload = self.get("products", &[]).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(payload.products.clone()),
            )
            .await;
        Ok(payload.products)
    }

    /// Fetch a single product by id (cached for 5 minutes).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails;
    /// an unknown id surfaces as `ApiError::Api { code: 404, .. }`.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!(%id, "product served from cache");
            return Ok(*product);
        }

        let path = format!("products/{}", urlencoding::encode(id.as_str()));
        let payload: ProductPayload = self.get(&path, &[]).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(payload.product.clone())))
            .await;
        Ok(payload.product)
    }

    /// Fetch per-day sales records for the trailing `days` window.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn sales_records(&self, days: u64) -> Result<Vec<SaleRecord>, ApiError> {
        let payload: SalesPayload = self
            .get("sales", &[("days", days.to_string())])
            .await?;
        Ok(payload.sales_records)
    }

    // =========================================================================
    // Discounts & delivery
    // =========================================================================

    /// Fetch the active discount rules for a scope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn active_discounts(
        &self,
        scope: DiscountScope,
    ) -> Result<Vec<DiscountRule>, ApiError> {
        let path = match scope {
            DiscountScope::Product => "discounts/product",
            DiscountScope::Delivery => "discounts/delivery",
        };
        let payload: DiscountsPayload = self
            .get(path, &[("active", "true".to_string())])
            .await?;
        Ok(payload.discounts)
    }

    /// Look up the delivery fee for a state/LGA pair.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn delivery_fee(&self, state: &str, lga: &str) -> Result<Naira, ApiError> {
        let payload: DeliveryFeePayload = self
            .get(
                "delivery-fees",
                &[("state", state.to_string()), ("lga", lga.to_string())],
            )
            .await?;
        Ok(payload.fee)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Initiate a checkout upstream.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails; the
    /// caller must not clear the cart in that case.
    #[instrument(skip(self, request), fields(reference = %request.reference))]
    pub async fn initiate_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.post("checkout", request).await
    }

    // =========================================================================
    // Newsletter
    // =========================================================================

    /// Subscribe an email to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<(), ApiError> {
        let _: EmptyPayload = self
            .post("newsletter/subscribe", &serde_json::json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// Unsubscribe an email from the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), ApiError> {
        let _: EmptyPayload = self
            .post(
                "newsletter/unsubscribe",
                &serde_json::json!({ "email": email }),
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Consultations
    // =========================================================================

    /// Fetch consultation slots for a date.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails.
    #[instrument(skip(self))]
    pub async fn consultation_slots(
        &self,
        date: chrono::NaiveDate,
    ) -> Result<Vec<ConsultationSlot>, ApiError> {
        let payload: SlotsPayload = self
            .get("consultations/slots", &[("date", date.to_string())])
            .await?;
        Ok(payload.slots)
    }

    /// Book a consultation slot.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or envelope decode fails (e.g.
    /// the slot was taken in the meantime).
    #[instrument(skip(self, request), fields(date = %request.date, time = %request.time))]
    pub async fn book_consultation(
        &self,
        request: &BookingRequest,
    ) -> Result<glowella_core::types::BookingId, ApiError> {
        let payload: BookingPayload = self.post("consultations", request).await?;
        Ok(payload.booking_id)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Cheap upstream reachability probe for the readiness endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` when the API is unreachable.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = self.endpoint("health")?;
        self.inner.client.get(url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_success() {
        let body = r#"{"code":200,"message":"ok","fee":1500}"#;
        let payload: DeliveryFeePayload = decode_envelope(body).expect("decodes");
        assert_eq!(payload.fee, Naira::from(1500));
    }

    #[test]
    fn test_decode_envelope_error_code() {
        let body = r#"{"code":403,"message":"forbidden"}"#;
        let err = decode_envelope::<DeliveryFeePayload>(body).expect_err("must fail");
        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_envelope_missing_message() {
        let body = r#"{"code":500}"#;
        let err = decode_envelope::<DeliveryFeePayload>(body).expect_err("must fail");
        assert!(matches!(err, ApiError::Api { code: 500, .. }));
    }

    #[test]
    fn test_decode_envelope_garbage_body() {
        let err = decode_envelope::<DeliveryFeePayload>("<html>oops</html>").expect_err("fails");
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_decode_envelope_products() {
        let body = r#"{
            "code": 200,
            "message": "success",
            "products": [{
                "id": "p1",
                "name": "Glow Serum",
                "description": "with hyaluronic acid",
                "category": "serums",
                "price": 5000,
                "images": ["https://cdn.glowella.shop/p1.jpg"],
                "availableQty": 12
            }]
        }"#;
        let payload: ProductsPayload = decode_envelope(body).expect("decodes");
        assert_eq!(payload.products.len(), 1);
        let product = payload.products.first().expect("one product");
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.available_qty, 12);
        assert_eq!(product.slashed_price, None);
    }
}
