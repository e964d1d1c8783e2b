//! Paddle Vendor - Client for the Paddle vendor API
//!
//! This crate wraps the vendor API endpoints for products, orders,
//! subscriptions, coupons and licenses behind the `VendorApi` port, and
//! verifies the RSA signatures on incoming webhooks.
//!
//! ```ignore
//! use paddle_vendor::{PaddleClient, PaddleClientConfig, VendorApi};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = PaddleClient::new(PaddleClientConfig::new(api_key, vendor_id))?;
//! let product = client.get_product("12345", &CancellationToken::new()).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{PaddleClient, PaddleClientConfig};
pub use config::{Environment, PaddleConfig};
pub use domain::webhook::{verify_signature, verify_webhook_fields};
pub use ports::{PaddleError, VendorApi};
