//! Vendor API port.
//!
//! Defines the contract for the payment provider's vendor API. The HTTP
//! implementation lives in `adapters::paddle`; a scriptable mock is provided
//! for tests of code that depends on this port.
//!
//! # Design
//!
//! - **Stateless**: every call is an independent round trip
//! - **Cancellable**: every call takes a `CancellationToken`
//! - **Transparent**: no retries, no caching; failures surface as `PaddleError`

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    Coupon, CouponDeletion, CreateCouponRequest, LicenseActivation, LicenseValidation, Order,
    PaddleResponse, Product, Subscription, SubscriptionCancellation, SubscriptionQuery,
    SubscriptionUpdate, UpdateSubscriptionRequest,
};

/// Port for the vendor API.
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Get a product by ID.
    async fn get_product(
        &self,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Product>, PaddleError>;

    /// Get an order by ID.
    async fn get_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Order>, PaddleError>;

    /// List the subscribers of a plan, one page at a time.
    async fn list_subscriptions(
        &self,
        query: &SubscriptionQuery,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Subscription>>, PaddleError>;

    /// Move a subscription to another plan.
    async fn update_subscription_plan(
        &self,
        request: &UpdateSubscriptionRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionUpdate>, PaddleError>;

    /// Cancel a subscription.
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionCancellation>, PaddleError>;

    /// Generate one or more coupon codes.
    async fn create_coupon(
        &self,
        request: &CreateCouponRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Coupon>, PaddleError>;

    /// List coupons, optionally only those of one product.
    async fn list_coupons(
        &self,
        product_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Coupon>>, PaddleError>;

    /// Delete a coupon code from a product.
    async fn delete_coupon(
        &self,
        coupon_code: &str,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<CouponDeletion, PaddleError>;

    /// Check a license key without consuming an activation.
    async fn validate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseValidation>, PaddleError>;

    /// Consume one activation of a license key.
    async fn activate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseActivation>, PaddleError>;
}

/// Errors from vendor API operations.
#[derive(Debug, Error)]
pub enum PaddleError {
    /// Client configuration is invalid (missing credentials, bad base URL).
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// Connection, DNS or TLS failure.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The transport gave up waiting for the vendor API.
    #[error("Request timed out")]
    Timeout,

    /// The vendor API answered with a non-2xx status.
    #[error("Vendor API returned HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A 2xx body did not match the expected shape.
    #[error("Failed to deserialize {operation} response: {source}")]
    Deserialization {
        /// Operation whose response failed to parse.
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The vendor API reported `success: false` with an error object.
    #[error("Vendor API error {code}: {message}")]
    Api {
        /// Vendor error code.
        code: i64,
        /// Vendor error message.
        message: String,
    },

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,
}

impl PaddleError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// HTTP status of an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PaddleError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller cancelled the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PaddleError::Cancelled)
    }

    /// Whether the response arrived but could not be decoded.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, PaddleError::Deserialization { .. })
    }
}

impl From<reqwest::Error> for PaddleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PaddleError::Timeout
        } else {
            PaddleError::Transport(err)
        }
    }
}
