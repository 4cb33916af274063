use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::segment::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: Uuid,
    pub billing_period: BillingPeriod,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// Administrative paid-plan override.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub user_id: Uuid,
    pub new_plan: String,
}

#[derive(Debug, Serialize)]
pub struct UpdatePlanResponse {
    pub user_id: Uuid,
    pub paid_plan: PlanTier,
    pub premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_period_parses_lowercase() {
        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "billing_period": "yearly"
        }))
        .unwrap();
        assert_eq!(req.billing_period, BillingPeriod::Yearly);

        assert!(serde_json::from_value::<CheckoutRequest>(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "billing_period": "weekly"
        }))
        .is_err());
    }
}
