//! Vendor API adapter.
//!
//! Implements the `VendorApi` port over HTTP, including:
//! - Product and order lookups
//! - Subscription listing, plan changes and cancellation
//! - Coupon creation, listing and deletion
//! - License validation and activation
//!
//! # Security
//!
//! - The vendor auth code is handled via `secrecy::SecretString`
//! - Webhook verification delegates to `domain::webhook`
//!
//! # Configuration
//!
//! See `config::PaddleConfig` for the `PADDLE__*` environment variables.

mod client;
mod mock_vendor_api;
mod operation;

pub use client::{PaddleClient, PaddleClientConfig};
pub use mock_vendor_api::{MethodCall, MockVendorApi};
pub use operation::Operation;
