use serde::Serialize;

use super::segment::Segment;

/// Priced plan descriptor shown to the user. Label, description and billing
/// note are presentation metadata only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanQuote {
    pub label: &'static str,
    pub description: &'static str,
    pub monthly_price: f64,
    pub yearly_price: Option<f64>,
    pub billing_note: String,
}

/// Price a plan for a segment. Agency pricing steps on the number of managed
/// profiles and has no yearly price.
pub fn quote_plan(segment: Segment, profiles_count: i32) -> PlanQuote {
    match segment {
        Segment::Casual => PlanQuote {
            label: segment.label(),
            description: "For creators posting for fun who want a sensible \
                          baseline price for their first collaborations.",
            monthly_price: 0.0,
            yearly_price: Some(0.0),
            billing_note: "Free plan for profiles under 2,000 followers.".to_string(),
        },
        Segment::Emerging => PlanQuote {
            label: segment.label(),
            description: "For creators starting to receive brand proposals \
                          who want a structured rate card.",
            monthly_price: 4.90,
            yearly_price: Some(49.00),
            billing_note: "Monthly (4.90) or yearly (49.00, two months free).".to_string(),
        },
        Segment::Pro => PlanQuote {
            label: segment.label(),
            description: "For creators working with several brands who want \
                          a clear media kit and pricing.",
            monthly_price: 9.90,
            yearly_price: Some(99.00),
            billing_note: "Built for creators who (almost) live off their content.".to_string(),
        },
        Segment::Agency => {
            let (monthly, note) = if profiles_count <= 2 {
                (99.0, "up to 2 managed profiles")
            } else if profiles_count == 3 {
                (199.0, "up to 3 managed profiles")
            } else if profiles_count == 4 {
                (299.0, "up to 4 managed profiles")
            } else {
                (399.0, "from 5 profiles up")
            };
            PlanQuote {
                label: segment.label(),
                description: "For agencies, networks and teams managing \
                              several significant profiles.",
                monthly_price: monthly,
                yearly_price: None,
                billing_note: format!("Agency plan: {note}."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::segment::classify;

    #[test]
    fn casual_is_free() {
        let quote = quote_plan(Segment::Casual, 1);
        assert_eq!(quote.monthly_price, 0.0);
        assert_eq!(quote.yearly_price, Some(0.0));
    }

    #[test]
    fn emerging_and_pro_prices() {
        let emerging = quote_plan(Segment::Emerging, 1);
        assert_eq!(emerging.monthly_price, 4.90);
        assert_eq!(emerging.yearly_price, Some(49.00));

        let pro = quote_plan(Segment::Pro, 1);
        assert_eq!(pro.monthly_price, 9.90);
        assert_eq!(pro.yearly_price, Some(99.00));
    }

    #[test]
    fn agency_monthly_steps_on_profile_count() {
        assert_eq!(quote_plan(Segment::Agency, 1).monthly_price, 99.0);
        assert_eq!(quote_plan(Segment::Agency, 2).monthly_price, 99.0);
        assert_eq!(quote_plan(Segment::Agency, 3).monthly_price, 199.0);
        assert_eq!(quote_plan(Segment::Agency, 4).monthly_price, 299.0);
        assert_eq!(quote_plan(Segment::Agency, 5).monthly_price, 399.0);
        assert_eq!(quote_plan(Segment::Agency, 12).monthly_price, 399.0);
    }

    #[test]
    fn agency_has_no_yearly_price() {
        assert_eq!(quote_plan(Segment::Agency, 3).yearly_price, None);
    }

    #[test]
    fn pricer_is_deterministic() {
        for profiles in 1..=8 {
            assert_eq!(
                quote_plan(Segment::Agency, profiles),
                quote_plan(Segment::Agency, profiles)
            );
        }
    }

    #[test]
    fn signup_scenarios_from_the_rate_card() {
        // 1,500 followers, single profile: casual, free.
        let seg = classify(1_500, 1);
        assert_eq!(seg, Segment::Casual);
        assert_eq!(quote_plan(seg, 1).monthly_price, 0.0);

        // 5,000 followers, single profile: emerging at 4.90.
        let seg = classify(5_000, 1);
        assert_eq!(seg, Segment::Emerging);
        assert_eq!(quote_plan(seg, 1).monthly_price, 4.90);

        // 250,000 followers across 3 profiles: the multi-profile rule fires
        // before the follower bands, and pricing steps on profile count.
        let seg = classify(250_000, 3);
        assert_eq!(seg, Segment::Agency);
        assert_eq!(quote_plan(seg, 3).monthly_price, 199.0);
    }
}
