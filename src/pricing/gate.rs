use super::segment::{PlanTier, Segment};

/// Sentinel written in place of redacted fields.
pub const LOCKED: &str = "locked";

/// Outcome of comparing the user's paid tier against the tier their segment
/// requires. Priced output is redacted when locked; view estimates and
/// labels always stay visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub locked: bool,
    pub upgrade_message: Option<String>,
}

pub fn evaluate(segment: Segment, paid: PlanTier) -> GateDecision {
    let required = segment.required_tier();
    if paid < required {
        GateDecision {
            locked: true,
            upgrade_message: Some(format!(
                "Your profile is in the {} segment. Upgrade to the {} plan to unlock suggested rates and tips.",
                segment.as_str(),
                required.as_str()
            )),
        }
    } else {
        GateDecision {
            locked: false,
            upgrade_message: None,
        }
    }
}
