use serde::{Deserialize, Serialize};

/// Creator segment derived from follower and managed-profile counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Casual,
    Emerging,
    Pro,
    Agency,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Casual => "casual",
            Segment::Emerging => "emerging",
            Segment::Pro => "pro",
            Segment::Agency => "agency",
        }
    }

    pub fn parse(raw: &str) -> Option<Segment> {
        match raw {
            "casual" => Some(Segment::Casual),
            "emerging" => Some(Segment::Emerging),
            "pro" => Some(Segment::Pro),
            "agency" => Some(Segment::Agency),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Segment::Casual => "Casual - hobby profile",
            Segment::Emerging => "Emerging - first brand deals",
            Segment::Pro => "Creator Pro - structured collaborations",
            Segment::Agency => "Top Agency - multi profile",
        }
    }

    /// The paid tier a user must hold to see priced output for this segment.
    pub fn required_tier(&self) -> PlanTier {
        match self {
            Segment::Casual => PlanTier::Free,
            Segment::Emerging => PlanTier::Emerging,
            Segment::Pro => PlanTier::Pro,
            Segment::Agency => PlanTier::Agency,
        }
    }
}

/// Paid plan tier. Variant order is the tier order, so the derived `Ord`
/// gives free < emerging < pro < agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Emerging,
    Pro,
    Agency,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Emerging => "emerging",
            PlanTier::Pro => "pro",
            PlanTier::Agency => "agency",
        }
    }

    pub fn parse(raw: &str) -> Option<PlanTier> {
        match raw {
            "free" => Some(PlanTier::Free),
            "emerging" => Some(PlanTier::Emerging),
            "pro" => Some(PlanTier::Pro),
            "agency" => Some(PlanTier::Agency),
            _ => None,
        }
    }
}

/// Classify a creator. First match wins; any multi-profile account is
/// `agency` regardless of follower count.
pub fn classify(followers: i64, profiles_count: i32) -> Segment {
    if profiles_count > 1 || followers >= 200_000 {
        return Segment::Agency;
    }
    if followers < 2_000 {
        return Segment::Casual;
    }
    if followers < 10_000 {
        return Segment::Emerging;
    }
    if followers < 200_000 {
        return Segment::Pro;
    }
    Segment::Agency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_band_boundaries_are_exact() {
        assert_eq!(classify(1_999, 1), Segment::Casual);
        assert_eq!(classify(2_000, 1), Segment::Emerging);
        assert_eq!(classify(9_999, 1), Segment::Emerging);
        assert_eq!(classify(10_000, 1), Segment::Pro);
        assert_eq!(classify(199_999, 1), Segment::Pro);
        assert_eq!(classify(200_000, 1), Segment::Agency);
    }

    #[test]
    fn multi_profile_always_wins() {
        for followers in [0i64, 500, 1_999, 2_000, 9_999, 50_000, 199_999, 1_000_000] {
            assert_eq!(classify(followers, 2), Segment::Agency);
            assert_eq!(classify(followers, 7), Segment::Agency);
        }
    }

    #[test]
    fn classifier_is_total_over_reasonable_inputs() {
        for followers in (0i64..1_000_000).step_by(977) {
            for profiles in 1..=6 {
                // Must not panic and must return one of the four segments.
                let seg = classify(followers, profiles);
                assert!(Segment::parse(seg.as_str()) == Some(seg));
            }
        }
    }

    #[test]
    fn tier_order_matches_spec() {
        assert!(PlanTier::Free < PlanTier::Emerging);
        assert!(PlanTier::Emerging < PlanTier::Pro);
        assert!(PlanTier::Pro < PlanTier::Agency);
    }

    #[test]
    fn required_tier_map() {
        assert_eq!(Segment::Casual.required_tier(), PlanTier::Free);
        assert_eq!(Segment::Emerging.required_tier(), PlanTier::Emerging);
        assert_eq!(Segment::Pro.required_tier(), PlanTier::Pro);
        assert_eq!(Segment::Agency.required_tier(), PlanTier::Agency);
    }

    #[test]
    fn parse_round_trips() {
        for seg in [Segment::Casual, Segment::Emerging, Segment::Pro, Segment::Agency] {
            assert_eq!(Segment::parse(seg.as_str()), Some(seg));
        }
        for tier in [PlanTier::Free, PlanTier::Emerging, PlanTier::Pro, PlanTier::Agency] {
            assert_eq!(PlanTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(Segment::parse("vip"), None);
        assert_eq!(PlanTier::parse("platinum"), None);
    }
}
