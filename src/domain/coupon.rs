//! Coupon records and the coupon creation request.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates;

/// How a coupon discount is applied.
///
/// Values the vendor adds later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount off, in the coupon currency.
    Flat,
    /// Percentage off.
    Percentage,
    #[serde(untagged)]
    Other(String),
}

impl DiscountType {
    /// Wire value for the `discount_type` form field.
    pub fn as_str(&self) -> &str {
        match self {
            DiscountType::Flat => "flat",
            DiscountType::Percentage => "percentage",
            DiscountType::Other(value) => value,
        }
    }
}

/// What a coupon applies to.
///
/// Values the vendor adds later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponType {
    /// Restricted to the listed products.
    Product,
    /// Applies to the whole checkout.
    Checkout,
    #[serde(untagged)]
    Other(String),
}

impl CouponType {
    /// Wire value for the `coupon_type` form field.
    pub fn as_str(&self) -> &str {
        match self {
            CouponType::Product => "product",
            CouponType::Checkout => "checkout",
            CouponType::Other(value) => value,
        }
    }
}

/// A coupon as returned by `/product/create_coupon` and `/product/list_coupons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Redeemable code.
    pub coupon_code: String,

    pub discount_type: DiscountType,

    pub discount_amount: Decimal,

    /// Expiry, absent for coupons that never expire.
    #[serde(default, with = "dates::optional_timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,

    /// Total number of redemptions allowed.
    pub allowed_uses: u32,

    /// Redemptions so far.
    pub times_used: u32,
}

/// Request for `/product/create_coupon`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCouponRequest {
    pub discount_type: DiscountType,

    pub discount_amount: Decimal,

    pub coupon_type: CouponType,

    /// Prefix prepended to every generated code.
    pub coupon_prefix: String,

    /// Number of codes to generate.
    pub num_coupons: u32,

    pub description: String,

    /// Last valid day; sent as `YYYY-MM-DD`.
    pub expiry_date: Option<NaiveDate>,

    /// Products the coupon is restricted to; sent comma-joined.
    pub product_ids: Vec<String>,

    /// Redemptions allowed per generated code.
    pub allowed_uses: u32,

    /// Currency for flat discounts.
    pub currency: String,
}

/// Result of `/product/delete_coupon`.
///
/// The delete endpoint answers with a bare envelope, so unlike the other
/// records this one carries the success flag itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDeletion {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}
