//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `VendorApi` - Port for the payment provider's vendor API
//! - `PaddleError` - Failure taxonomy shared by all implementations

mod vendor_api;

pub use vendor_api::{PaddleError, VendorApi};
