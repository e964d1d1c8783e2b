//! Vendor API endpoints.

use std::fmt;

use reqwest::Method;

/// One vendor API operation: its name for logs and errors, its HTTP method
/// and its path below the environment base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetProduct,
    GetOrder,
    ListSubscriptions,
    UpdateSubscriptionPlan,
    CancelSubscription,
    CreateCoupon,
    ListCoupons,
    DeleteCoupon,
    ValidateLicense,
    ActivateLicense,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::GetProduct,
        Operation::GetOrder,
        Operation::ListSubscriptions,
        Operation::UpdateSubscriptionPlan,
        Operation::CancelSubscription,
        Operation::CreateCoupon,
        Operation::ListCoupons,
        Operation::DeleteCoupon,
        Operation::ValidateLicense,
        Operation::ActivateLicense,
    ];

    /// Name used in logs and `PaddleError::Deserialization`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetProduct => "get_product",
            Operation::GetOrder => "get_order",
            Operation::ListSubscriptions => "list_subscriptions",
            Operation::UpdateSubscriptionPlan => "update_subscription_plan",
            Operation::CancelSubscription => "cancel_subscription",
            Operation::CreateCoupon => "create_coupon",
            Operation::ListCoupons => "list_coupons",
            Operation::DeleteCoupon => "delete_coupon",
            Operation::ValidateLicense => "validate_license",
            Operation::ActivateLicense => "activate_license",
        }
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::GetProduct => "/product/get_products",
            Operation::GetOrder => "/order/details",
            Operation::ListSubscriptions => "/subscription/users",
            Operation::UpdateSubscriptionPlan => "/subscription/users/update",
            Operation::CancelSubscription => "/subscription/users/cancel",
            Operation::CreateCoupon => "/product/create_coupon",
            Operation::ListCoupons => "/product/list_coupons",
            Operation::DeleteCoupon => "/product/delete_coupon",
            Operation::ValidateLicense => "/license/verify",
            Operation::ActivateLicense => "/license/activate",
        }
    }

    /// Reads go as GET with a query string, writes as form-encoded POST.
    pub fn method(&self) -> Method {
        match self {
            Operation::GetProduct
            | Operation::GetOrder
            | Operation::ListSubscriptions
            | Operation::ListCoupons => Method::GET,
            _ => Method::POST,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_paths_are_unique() {
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        let paths: HashSet<_> = Operation::ALL.iter().map(|op| op.path()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
        assert_eq!(paths.len(), Operation::ALL.len());
    }

    #[test]
    fn reads_are_get() {
        assert_eq!(Operation::GetProduct.method(), Method::GET);
        assert_eq!(Operation::ListCoupons.method(), Method::GET);
        assert_eq!(Operation::CancelSubscription.method(), Method::POST);
        assert_eq!(Operation::ActivateLicense.method(), Method::POST);
    }

    #[test]
    fn paths_are_rooted() {
        for op in Operation::ALL {
            assert!(op.path().starts_with('/'), "{op} path must start with '/'");
        }
    }
}
