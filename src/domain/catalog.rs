//! Product and order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates;

/// A product as returned by `/product/get_products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Vendor product ID.
    pub product_id: String,

    /// Display name.
    pub name: String,

    /// Product description.
    pub description: String,

    /// Base price before taxes and discounts.
    pub base_price: Decimal,

    /// ISO 4217 currency code of `base_price`.
    pub currency: String,
}

/// An order as returned by `/order/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Vendor order ID.
    pub order_id: String,

    /// Order status (e.g. `completed`, `processing`).
    pub status: String,

    /// Order total.
    pub total: Decimal,

    /// ISO 4217 currency code of `total`.
    pub currency: String,

    /// When the order was placed.
    #[serde(with = "dates::timestamp")]
    pub created_at: DateTime<Utc>,
}
