//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `paddle` - HTTP client for the vendor API, plus a mock for tests

pub mod paddle;

pub use paddle::{MockVendorApi, Operation, PaddleClient, PaddleClientConfig};
