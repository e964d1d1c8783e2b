//! Subscription records and request types.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates;

/// A subscription user as returned by `/subscription/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Vendor subscription ID.
    pub subscription_id: String,

    /// Plan the subscription belongs to.
    pub plan_id: String,

    /// Current state as reported by the vendor API.
    pub status: String,

    /// Date of the next scheduled payment.
    #[serde(with = "dates::timestamp")]
    pub next_payment_date: DateTime<Utc>,

    /// Recurring amount.
    pub amount: Decimal,

    /// ISO 4217 currency code of `amount`.
    pub currency: String,

    /// Vendor customer ID.
    pub customer_id: String,
}

/// Result of moving a subscription to another plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    /// Vendor subscription ID.
    pub subscription_id: String,

    /// Plan the subscription was moved to.
    pub new_plan_id: String,

    /// Date of the next scheduled payment under the new plan.
    #[serde(with = "dates::timestamp")]
    pub next_payment_date: DateTime<Utc>,

    /// Recurring amount under the new plan.
    pub new_amount: Decimal,
}

/// Result of cancelling a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCancellation {
    /// Vendor subscription ID.
    pub subscription_id: String,

    /// State after cancellation.
    pub status: String,

    /// When the cancellation takes effect, if the vendor reports it.
    #[serde(default, with = "dates::optional_timestamp")]
    pub cancellation_effective_date: Option<DateTime<Utc>>,
}

/// State filter for subscription listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    Active,
    PastDue,
    Trialing,
    Paused,
    Deleted,
}

impl SubscriptionState {
    /// Wire value for the `state` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionState::Active => "active",
            SubscriptionState::PastDue => "past_due",
            SubscriptionState::Trialing => "trialing",
            SubscriptionState::Paused => "paused",
            SubscriptionState::Deleted => "deleted",
        }
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query for listing the subscribers of a plan.
///
/// ```
/// use paddle_vendor::domain::{SubscriptionQuery, SubscriptionState};
///
/// let query = SubscriptionQuery::new("plan_9")
///     .with_state(SubscriptionState::PastDue)
///     .with_page(3);
/// assert_eq!(query.page, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionQuery {
    /// Plan to list subscribers for.
    pub plan_id: String,

    /// Optional state filter.
    pub state: Option<SubscriptionState>,

    /// 1-based page number.
    pub page: u32,
}

impl SubscriptionQuery {
    /// Creates a query for the first page with no state filter.
    pub fn new(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            state: None,
            page: 1,
        }
    }

    /// Restricts the listing to one state.
    pub fn with_state(mut self, state: SubscriptionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Selects a page. Page numbers start at 1; 0 is treated as 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Request to move a subscription to another plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSubscriptionRequest {
    /// Subscription to update.
    pub subscription_id: String,

    /// Target plan.
    pub plan_id: String,

    /// Whether to prorate the change. Defaults to `true`.
    pub prorate: bool,
}

impl UpdateSubscriptionRequest {
    /// Creates a prorated plan change.
    pub fn new(subscription_id: impl Into<String>, plan_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            plan_id: plan_id.into(),
            prorate: true,
        }
    }

    /// Enables or disables proration.
    pub fn with_prorate(mut self, prorate: bool) -> Self {
        self.prorate = prorate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_defaults_to_first_page_without_filter() {
        let query = SubscriptionQuery::new("plan_1");
        assert_eq!(query.page, 1);
        assert_eq!(query.state, None);
    }

    #[test]
    fn query_page_zero_clamps_to_one() {
        assert_eq!(SubscriptionQuery::new("plan_1").with_page(0).page, 1);
    }

    #[test]
    fn state_wire_values() {
        assert_eq!(SubscriptionState::Active.as_str(), "active");
        assert_eq!(SubscriptionState::PastDue.as_str(), "past_due");
        assert_eq!(SubscriptionState::Trialing.to_string(), "trialing");
        assert_eq!(SubscriptionState::Paused.as_str(), "paused");
        assert_eq!(SubscriptionState::Deleted.as_str(), "deleted");
    }

    #[test]
    fn update_request_prorates_by_default() {
        let request = UpdateSubscriptionRequest::new("sub_1", "plan_2");
        assert!(request.prorate);
        assert!(!request.with_prorate(false).prorate);
    }

    #[test]
    fn cancellation_without_effective_date_is_none() {
        let cancellation: SubscriptionCancellation = serde_json::from_value(json!({
            "subscription_id": "sub_1",
            "status": "deleted"
        }))
        .unwrap();
        assert_eq!(cancellation.cancellation_effective_date, None);

        let explicit_null: SubscriptionCancellation = serde_json::from_value(json!({
            "subscription_id": "sub_1",
            "status": "deleted",
            "cancellation_effective_date": null
        }))
        .unwrap();
        assert_eq!(explicit_null.cancellation_effective_date, None);
    }

    #[test]
    fn cancellation_with_effective_date() {
        let cancellation: SubscriptionCancellation = serde_json::from_value(json!({
            "subscription_id": "sub_1",
            "status": "deleted",
            "cancellation_effective_date": "2024-03-01"
        }))
        .unwrap();
        assert!(cancellation.cancellation_effective_date.is_some());
    }
}
