//! HTTP adapter for the vendor API.
//!
//! Implements the `VendorApi` port on top of `reqwest`. Every call sends the
//! vendor credentials (`vendor_id`, `vendor_auth_code`) alongside the
//! operation's own parameters: reads as a GET query string, writes as a
//! form-encoded POST body.
//!
//! # Security
//!
//! - The vendor auth code is held as a `secrecy::SecretString`
//! - Neither `Debug` output nor logs include credentials or query strings
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaddleClientConfig::new(api_key, vendor_id)
//!     .with_environment(Environment::Sandbox)
//!     .with_timeout(Duration::from_secs(10));
//! let client = PaddleClient::new(config)?;
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::{Environment, PaddleConfig};
use crate::domain::dates;
use crate::domain::webhook;
use crate::domain::{
    Coupon, CouponDeletion, CreateCouponRequest, FailureEnvelope, LicenseActivation,
    LicenseValidation, Order, PaddleResponse, Product, Subscription, SubscriptionCancellation,
    SubscriptionQuery, SubscriptionUpdate, UpdateSubscriptionRequest,
};
use crate::ports::{PaddleError, VendorApi};

use super::operation::Operation;

type Params = Vec<(&'static str, String)>;

/// Vendor API client configuration.
#[derive(Clone)]
pub struct PaddleClientConfig {
    /// Vendor auth code.
    api_key: SecretString,

    /// Numeric vendor ID, kept as text.
    vendor_id: String,

    /// Selects the default base URL.
    environment: Environment,

    /// Replaces the environment's base URL (for testing).
    base_url: Option<String>,

    /// Per-request timeout. `None` leaves the transport default.
    timeout: Option<Duration>,

    /// PEM public key for webhook deliveries.
    webhook_public_key: Option<String>,
}

impl PaddleClientConfig {
    /// Create a production configuration.
    pub fn new(api_key: impl Into<String>, vendor_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            vendor_id: vendor_id.into(),
            environment: Environment::default(),
            base_url: None,
            timeout: None,
            webhook_public_key: None,
        }
    }

    /// Select sandbox or production.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set a custom API base URL (for testing). A trailing `/` is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Key used by [`PaddleClient::verify_webhook`].
    pub fn with_webhook_public_key(mut self, pem: impl Into<String>) -> Self {
        self.webhook_public_key = Some(pem.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    fn validate(&self) -> Result<(), PaddleError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(PaddleError::configuration("API key is required"));
        }
        if self.vendor_id.trim().is_empty() {
            return Err(PaddleError::configuration("Vendor ID is required"));
        }
        let base_url = self.base_url();
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(PaddleError::configuration(format!(
                "Base URL must be http(s): {base_url}"
            )));
        }
        Ok(())
    }
}

impl From<&PaddleConfig> for PaddleClientConfig {
    fn from(config: &PaddleConfig) -> Self {
        let mut client_config = PaddleClientConfig::new(&config.api_key, &config.vendor_id)
            .with_environment(config.environment)
            .with_timeout(config.timeout());

        if let Some(url) = &config.base_url {
            client_config = client_config.with_base_url(url);
        }
        if let Some(pem) = &config.webhook_public_key {
            client_config = client_config.with_webhook_public_key(pem);
        }
        client_config
    }
}

impl fmt::Debug for PaddleClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddleClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("vendor_id", &self.vendor_id)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .field("webhook_public_key", &self.webhook_public_key.is_some())
            .finish()
    }
}

/// Vendor API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct PaddleClient {
    config: PaddleClientConfig,
    http_client: reqwest::Client,
}

impl PaddleClient {
    /// Create a client with its own transport.
    ///
    /// Fails with `PaddleError::Configuration` when the API key or vendor ID
    /// is blank, before any network activity.
    pub fn new(config: PaddleClientConfig) -> Result<Self, PaddleError> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| PaddleError::configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client on a caller-supplied transport.
    ///
    /// The configured base URL still applies; `reqwest::Client` has no base
    /// address of its own.
    pub fn with_http_client(
        config: PaddleClientConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, PaddleError> {
        config.validate()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client from application configuration.
    pub fn from_config(config: &PaddleConfig) -> Result<Self, PaddleError> {
        Self::new(PaddleClientConfig::from(config))
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &PaddleClientConfig {
        &self.config
    }

    /// Verify a webhook signature. See [`webhook::verify_signature`].
    pub fn verify_webhook_signature<I, K, V>(
        &self,
        signature: &str,
        fields: I,
        public_key_pem: &str,
    ) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        webhook::verify_signature(signature, fields, public_key_pem)
    }

    /// Verify a complete webhook form, `p_signature` included, against the
    /// configured public key. Always `false` when no key is configured.
    pub fn verify_webhook<I, K, V>(&self, form: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match &self.config.webhook_public_key {
            Some(pem) => webhook::verify_webhook_fields(form, pem),
            None => {
                tracing::warn!("Webhook received but no webhook public key is configured");
                false
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Request Plumbing
    // ════════════════════════════════════════════════════════════════════════════

    fn request(&self, operation: Operation, mut params: Params) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url(), operation.path());

        params.push(("vendor_id", self.config.vendor_id.clone()));
        params.push((
            "vendor_auth_code",
            self.config.api_key.expose_secret().clone(),
        ));

        let request = if operation.method() == Method::GET {
            self.http_client.get(url).query(&params)
        } else {
            self.http_client.post(url).form(&params)
        };

        match self.config.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        params: Params,
        cancel: &CancellationToken,
    ) -> Result<T, PaddleError> {
        if cancel.is_cancelled() {
            return Err(PaddleError::Cancelled);
        }

        let request = self.request(operation, params);

        tracing::debug!(
            operation = %operation,
            method = %operation.method(),
            path = operation.path(),
            "Sending vendor API request"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(operation = %operation, "Vendor API request cancelled");
                Err(PaddleError::Cancelled)
            }
            result = exchange(operation, request) => result,
        }
    }
}

impl fmt::Debug for PaddleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddleClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn exchange<T: DeserializeOwned>(
    operation: Operation,
    request: RequestBuilder,
) -> Result<T, PaddleError> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(operation = %operation, error = %e, "Vendor API request failed");
        PaddleError::from(e)
    })?;

    let status = response.status();

    if !status.is_success() {
        tracing::warn!(
            operation = %operation,
            status = status.as_u16(),
            "Vendor API returned error status"
        );
        // The status alone decides the outcome; an unreadable body is empty.
        let body = response.text().await.unwrap_or_default();
        return Err(PaddleError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    decode_response(operation, &body)
}

/// Decode a 2xx body.
///
/// A `{"success": false, "error": {...}}` envelope becomes `PaddleError::Api`;
/// anything else that does not match `T` is a deserialization error.
pub(crate) fn decode_response<T: DeserializeOwned>(
    operation: Operation,
    body: &str,
) -> Result<T, PaddleError> {
    if let Ok(failure) = serde_json::from_str::<FailureEnvelope>(body) {
        if !failure.success {
            tracing::warn!(
                operation = %operation,
                code = failure.error.code,
                "Vendor API reported failure"
            );
            return Err(PaddleError::Api {
                code: failure.error.code,
                message: failure.error.message,
            });
        }
    }

    serde_json::from_str(body).map_err(|source| {
        tracing::warn!(
            operation = %operation,
            error = %source,
            "Failed to deserialize vendor API response"
        );
        PaddleError::Deserialization {
            operation: operation.name(),
            source,
        }
    })
}

fn subscription_query_params(query: &SubscriptionQuery) -> Params {
    let mut params = vec![
        ("plan", query.plan_id.clone()),
        ("page", query.page.max(1).to_string()),
    ];
    if let Some(state) = query.state {
        params.push(("state", state.as_str().to_string()));
    }
    params
}

fn coupon_form(request: &CreateCouponRequest) -> Params {
    let mut params = vec![
        ("discount_type", request.discount_type.as_str().to_string()),
        ("discount_amount", request.discount_amount.to_string()),
        ("coupon_type", request.coupon_type.as_str().to_string()),
        ("coupon_prefix", request.coupon_prefix.clone()),
        ("num_coupons", request.num_coupons.to_string()),
        ("description", request.description.clone()),
    ];
    if let Some(expiry) = request.expiry_date {
        params.push(("expires", dates::format_date(expiry)));
    }
    params.push(("product_ids", request.product_ids.join(",")));
    params.push(("allowed_uses", request.allowed_uses.to_string()));
    params.push(("currency", request.currency.clone()));
    params
}

#[async_trait]
impl VendorApi for PaddleClient {
    async fn get_product(
        &self,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Product>, PaddleError> {
        let params = vec![("product_id", product_id.to_string())];
        self.call(Operation::GetProduct, params, cancel).await
    }

    async fn get_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Order>, PaddleError> {
        let params = vec![("order_id", order_id.to_string())];
        self.call(Operation::GetOrder, params, cancel).await
    }

    async fn list_subscriptions(
        &self,
        query: &SubscriptionQuery,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Subscription>>, PaddleError> {
        let params = subscription_query_params(query);
        self.call(Operation::ListSubscriptions, params, cancel)
            .await
    }

    async fn update_subscription_plan(
        &self,
        request: &UpdateSubscriptionRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionUpdate>, PaddleError> {
        let params = vec![
            ("subscription_id", request.subscription_id.clone()),
            ("plan_id", request.plan_id.clone()),
            ("prorate", request.prorate.to_string()),
        ];
        self.call(Operation::UpdateSubscriptionPlan, params, cancel)
            .await
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionCancellation>, PaddleError> {
        let params = vec![("subscription_id", subscription_id.to_string())];
        self.call(Operation::CancelSubscription, params, cancel)
            .await
    }

    async fn create_coupon(
        &self,
        request: &CreateCouponRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Coupon>, PaddleError> {
        self.call(Operation::CreateCoupon, coupon_form(request), cancel)
            .await
    }

    async fn list_coupons(
        &self,
        product_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Coupon>>, PaddleError> {
        let params = product_id
            .map(|id| vec![("product_id", id.to_string())])
            .unwrap_or_default();
        self.call(Operation::ListCoupons, params, cancel).await
    }

    async fn delete_coupon(
        &self,
        coupon_code: &str,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<CouponDeletion, PaddleError> {
        let params = vec![
            ("coupon_code", coupon_code.to_string()),
            ("product_id", product_id.to_string()),
        ];
        self.call(Operation::DeleteCoupon, params, cancel).await
    }

    async fn validate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseValidation>, PaddleError> {
        let params = vec![
            ("product_id", product_id.to_string()),
            ("license_code", license_key.to_string()),
        ];
        self.call(Operation::ValidateLicense, params, cancel).await
    }

    async fn activate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseActivation>, PaddleError> {
        let params = vec![
            ("product_id", product_id.to_string()),
            ("license_code", license_key.to_string()),
        ];
        self.call(Operation::ActivateLicense, params, cancel).await
    }
}
