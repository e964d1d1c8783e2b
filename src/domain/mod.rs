//! Domain layer: vendor API records and webhook verification.
//!
//! # Module Organization
//!
//! - `catalog` - Products and orders
//! - `subscription` - Subscription users, plan changes, cancellations
//! - `coupon` - Coupons and coupon creation
//! - `license` - License validation and activation
//! - `response` - The `{success, response}` envelope
//! - `webhook` - Webhook signature verification
//!
//! Records are immutable values decoded from a single API response.

pub mod dates;
pub mod webhook;

mod catalog;
mod coupon;
mod license;
mod response;
mod subscription;

pub use catalog::{Order, Product};
pub use coupon::{Coupon, CouponDeletion, CouponType, CreateCouponRequest, DiscountType};
pub use license::{LicenseActivation, LicenseValidation};
pub use response::{ApiErrorBody, PaddleResponse};
pub(crate) use response::FailureEnvelope;
pub use subscription::{
    Subscription, SubscriptionCancellation, SubscriptionQuery, SubscriptionState,
    SubscriptionUpdate, UpdateSubscriptionRequest,
};
