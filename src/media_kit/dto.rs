use serde::Serialize;

use crate::pricing::estimator::{MediaKitEstimate, ViewEstimates};
use crate::pricing::gate::{GateDecision, LOCKED};
use crate::pricing::segment::Segment;
use crate::pricing::tips::ProfileTips;
use crate::users::repo::User;

/// A price that is either visible or redacted to the `"locked"` sentinel.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PriceField {
    Value(f64),
    Locked(&'static str),
}

impl PriceField {
    fn gated(value: f64, locked: bool) -> Self {
        if locked {
            PriceField::Locked(LOCKED)
        } else {
            PriceField::Value(value)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GatedRates {
    pub single_post: PriceField,
    pub single_story: PriceField,
    pub bundle_post_3_stories: PriceField,
}

#[derive(Debug, Serialize)]
pub struct MediaKitResponse {
    pub username: String,
    pub main_platform: String,
    pub platform: &'static str,
    pub segment: Segment,
    pub segment_label: &'static str,
    pub followers: i64,
    pub estimated: ViewEstimates,
    pub suggested_rates_eur: GatedRates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_message: Option<String>,
}

impl MediaKitResponse {
    /// View estimates stay visible even when the gate redacts prices.
    pub fn build(user: User, kit: MediaKitEstimate, decision: GateDecision) -> Self {
        let segment = user.current_segment();
        Self {
            username: user.username,
            main_platform: user.main_platform,
            platform: kit.platform.as_str(),
            segment,
            segment_label: segment.label(),
            followers: user.followers,
            estimated: kit.estimated,
            suggested_rates_eur: GatedRates {
                single_post: PriceField::gated(kit.rates.single_post, decision.locked),
                single_story: PriceField::gated(kit.rates.single_story, decision.locked),
                bundle_post_3_stories: PriceField::gated(
                    kit.rates.bundle_post_3_stories,
                    decision.locked,
                ),
            },
            upgrade_message: decision.upgrade_message,
        }
    }
}

/// Advisory list that is either visible or redacted as a whole.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TipsField {
    List(Vec<&'static str>),
    Locked(&'static str),
}

#[derive(Debug, Serialize)]
pub struct ProfileTipsResponse {
    pub segment: Segment,
    pub level: &'static str,
    pub summary: &'static str,
    pub tips: TipsField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_message: Option<String>,
}

impl ProfileTipsResponse {
    /// Level and summary stay visible; the tip list is what gets locked.
    pub fn build(segment: Segment, tips: ProfileTips, decision: GateDecision) -> Self {
        Self {
            segment,
            level: tips.level,
            summary: tips.summary,
            tips: if decision.locked {
                TipsField::Locked(LOCKED)
            } else {
                TipsField::List(tips.tips.to_vec())
            },
            upgrade_message: decision.upgrade_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{estimator, gate, tips};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn user(followers: i64, paid_plan: &str) -> User {
        let segment = crate::pricing::segment::classify(followers, 1);
        User {
            id: Uuid::new_v4(),
            email: "c@example.com".into(),
            password_hash: "x".into(),
            main_platform: "instagram".into(),
            username: "c".into(),
            followers,
            profiles_count: 1,
            segment: segment.as_str().into(),
            paid_plan: paid_plan.into(),
            stripe_customer_id: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn locked_kit_redacts_prices_but_keeps_views() {
        let u = user(5_000, "free");
        let segment = u.current_segment();
        let kit = estimator::estimate(u.followers, segment, &u.main_platform);
        let decision = gate::evaluate(segment, u.current_plan_tier());
        assert!(decision.locked);

        let body = serde_json::to_value(MediaKitResponse::build(u, kit, decision)).unwrap();
        assert_eq!(body["suggested_rates_eur"]["single_post"], "locked");
        assert_eq!(body["suggested_rates_eur"]["bundle_post_3_stories"], "locked");
        assert_eq!(body["estimated"]["post_avg_views"], 1_000);
        assert!(body["upgrade_message"].is_string());
    }

    #[test]
    fn entitled_kit_shows_numeric_prices() {
        let u = user(5_000, "emerging");
        let segment = u.current_segment();
        let kit = estimator::estimate(u.followers, segment, &u.main_platform);
        let decision = gate::evaluate(segment, u.current_plan_tier());
        assert!(!decision.locked);

        let body = serde_json::to_value(MediaKitResponse::build(u, kit, decision)).unwrap();
        assert_eq!(body["suggested_rates_eur"]["single_post"], 50.0);
        assert!(body.get("upgrade_message").is_none());
    }

    #[test]
    fn locked_tips_keep_level_and_summary() {
        let segment = crate::pricing::segment::Segment::Pro;
        let decision = gate::evaluate(segment, crate::pricing::segment::PlanTier::Free);
        let body = serde_json::to_value(ProfileTipsResponse::build(
            segment,
            tips::tips_for(segment),
            decision,
        ))
        .unwrap();
        assert_eq!(body["tips"], "locked");
        assert!(body["level"].is_string());
        assert!(body["summary"].is_string());
    }

    #[test]
    fn entitled_tips_list_all_five() {
        let segment = crate::pricing::segment::Segment::Casual;
        let decision = gate::evaluate(segment, crate::pricing::segment::PlanTier::Free);
        let body = serde_json::to_value(ProfileTipsResponse::build(
            segment,
            tips::tips_for(segment),
            decision,
        ))
        .unwrap();
        assert_eq!(body["tips"].as_array().unwrap().len(), 5);
    }
}
