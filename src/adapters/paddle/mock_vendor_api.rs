//! Mock vendor API for testing.
//!
//! Provides a configurable implementation of `VendorApi` for tests of code
//! that depends on the port. Supports:
//! - Scripted response bodies per operation
//! - Error injection
//! - Call tracking
//!
//! Scripted bodies go through the same decoding as real responses, so a
//! scripted failure envelope surfaces as `PaddleError::Api`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::domain::{
    Coupon, CouponDeletion, CreateCouponRequest, LicenseActivation, LicenseValidation, Order,
    PaddleResponse, Product, Subscription, SubscriptionCancellation, SubscriptionQuery,
    SubscriptionUpdate, UpdateSubscriptionRequest,
};
use crate::ports::{PaddleError, VendorApi};

use super::client::decode_response;
use super::operation::Operation;

/// Mock vendor API for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockVendorApi::new();
///
/// // Configure responses
/// mock.set_payload(Operation::GetProduct, &product);
///
/// // Inject errors
/// mock.set_method_error(Operation::GetOrder, PaddleError::Timeout);
///
/// // Use in tests
/// let result = mock.get_product("1", &CancellationToken::new()).await;
/// ```
#[derive(Default, Clone)]
pub struct MockVendorApi {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Response bodies by operation. Reused on every call.
    responses: HashMap<Operation, Value>,

    /// Error to return on the next call to any operation.
    next_error: Option<PaddleError>,

    /// One-shot errors by operation.
    method_errors: HashMap<Operation, PaddleError>,

    /// Track calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub operation: Operation,
    pub args: Vec<String>,
}

impl MockVendorApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the raw response body for an operation.
    pub fn set_response(&self, operation: Operation, body: Value) {
        self.state().responses.insert(operation, body);
    }

    /// Respond to an operation with `{"success": true, "response": payload}`.
    pub fn set_payload<T: Serialize>(&self, operation: Operation, payload: &T) {
        let payload = serde_json::to_value(payload).unwrap_or(Value::Null);
        self.set_response(operation, json!({ "success": true, "response": payload }));
    }

    /// Respond to an operation with a vendor failure envelope.
    pub fn set_api_failure(&self, operation: Operation, code: i64, message: impl Into<String>) {
        let message = message.into();
        self.set_response(
            operation,
            json!({ "success": false, "error": { "code": code, "message": message } }),
        );
    }

    /// Set an error to return on the next call to any operation.
    pub fn set_error(&self, error: PaddleError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for the next call to one operation.
    pub fn set_method_error(&self, operation: Operation, error: PaddleError) {
        self.state().method_errors.insert(operation, error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if an operation was called.
    pub fn was_called(&self, operation: Operation) -> bool {
        self.state()
            .call_log
            .iter()
            .any(|c| c.operation == operation)
    }

    /// Get count of calls to an operation.
    pub fn call_count(&self, operation: Operation) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn respond<T: DeserializeOwned>(
        &self,
        operation: Operation,
        args: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<T, PaddleError> {
        if cancel.is_cancelled() {
            return Err(PaddleError::Cancelled);
        }

        let body = {
            let mut state = self.state();
            state.call_log.push(MethodCall { operation, args });

            if let Some(error) = state.method_errors.remove(&operation) {
                return Err(error);
            }
            if let Some(error) = state.next_error.take() {
                return Err(error);
            }

            match state.responses.get(&operation) {
                Some(body) => body.to_string(),
                None => {
                    return Err(PaddleError::Http {
                        status: 404,
                        body: format!("no mock response for {operation}"),
                    })
                }
            }
        };

        decode_response(operation, &body)
    }
}

#[async_trait]
impl VendorApi for MockVendorApi {
    async fn get_product(
        &self,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Product>, PaddleError> {
        self.respond(Operation::GetProduct, vec![product_id.to_string()], cancel)
    }

    async fn get_order(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Order>, PaddleError> {
        self.respond(Operation::GetOrder, vec![order_id.to_string()], cancel)
    }

    async fn list_subscriptions(
        &self,
        query: &SubscriptionQuery,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Subscription>>, PaddleError> {
        let mut args = vec![query.plan_id.clone(), query.page.to_string()];
        if let Some(state) = query.state {
            args.push(state.to_string());
        }
        self.respond(Operation::ListSubscriptions, args, cancel)
    }

    async fn update_subscription_plan(
        &self,
        request: &UpdateSubscriptionRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionUpdate>, PaddleError> {
        let args = vec![
            request.subscription_id.clone(),
            request.plan_id.clone(),
            request.prorate.to_string(),
        ];
        self.respond(Operation::UpdateSubscriptionPlan, args, cancel)
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<SubscriptionCancellation>, PaddleError> {
        self.respond(
            Operation::CancelSubscription,
            vec![subscription_id.to_string()],
            cancel,
        )
    }

    async fn create_coupon(
        &self,
        request: &CreateCouponRequest,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Coupon>, PaddleError> {
        let args = vec![
            request.coupon_prefix.clone(),
            request.num_coupons.to_string(),
        ];
        self.respond(Operation::CreateCoupon, args, cancel)
    }

    async fn list_coupons(
        &self,
        product_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<Vec<Coupon>>, PaddleError> {
        let args = product_id.map(str::to_string).into_iter().collect();
        self.respond(Operation::ListCoupons, args, cancel)
    }

    async fn delete_coupon(
        &self,
        coupon_code: &str,
        product_id: &str,
        cancel: &CancellationToken,
    ) -> Result<CouponDeletion, PaddleError> {
        let args = vec![coupon_code.to_string(), product_id.to_string()];
        self.respond(Operation::DeleteCoupon, args, cancel)
    }

    async fn validate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseValidation>, PaddleError> {
        let args = vec![product_id.to_string(), license_key.to_string()];
        self.respond(Operation::ValidateLicense, args, cancel)
    }

    async fn activate_license(
        &self,
        product_id: &str,
        license_key: &str,
        cancel: &CancellationToken,
    ) -> Result<PaddleResponse<LicenseActivation>, PaddleError> {
        let args = vec![product_id.to_string(), license_key.to_string()];
        self.respond(Operation::ActivateLicense, args, cancel)
    }
}
