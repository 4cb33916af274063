use super::segment::Segment;

/// Static advisory block per segment: a level label, a short summary and
/// five ordered tips. No computation involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTips {
    pub level: &'static str,
    pub summary: &'static str,
    pub tips: [&'static str; 5],
}

pub fn tips_for(segment: Segment) -> ProfileTips {
    match segment {
        Segment::Casual => ProfileTips {
            level: "Getting started",
            summary: "You are building an audience for fun. Focus on consistency \
                      and on making your profile readable for a brand that \
                      stumbles onto it.",
            tips: [
                "Post on a regular schedule, even if it is only twice a week.",
                "Write a bio that says in one line who you are and what you post about.",
                "Use a recognisable profile picture across platforms.",
                "Reply to every comment; early engagement compounds.",
                "Save your best-performing posts in a highlight or pinned section.",
            ],
        },
        Segment::Emerging => ProfileTips {
            level: "Emerging creator",
            summary: "Brands are starting to notice you. Make it easy for them \
                      to evaluate you and to say yes at a fair price.",
            tips: [
                "Add a contact email for collaborations directly in your bio.",
                "Keep a simple media kit ready: audience, views, one price per format.",
                "Track which content formats drive saves and shares, not just likes.",
                "Answer brand outreach within 24 hours with your rates attached.",
                "Pick one niche and stay on it; mixed feeds price lower.",
            ],
        },
        Segment::Pro => ProfileTips {
            level: "Professional creator",
            summary: "Content is a real income stream for you. Treat inbound \
                      deals like a sales pipeline and defend your pricing.",
            tips: [
                "Quote bundles (post + stories) before single deliverables.",
                "Ask for usage rights and whitelisting as paid add-ons.",
                "Keep a public portfolio page with past brand work and results.",
                "Review your rates every quarter against audience growth.",
                "Negotiate multi-month deals; retainer income beats one-offs.",
            ],
        },
        Segment::Agency => ProfileTips {
            level: "Agency / multi-profile",
            summary: "You manage several significant profiles. Standardise your \
                      offer and report results the way media buyers expect.",
            tips: [
                "Build one rate card per managed profile and keep them consistent.",
                "Offer cross-profile packages; bundled reach commands a premium.",
                "Send post-campaign reports with views, CTR and audience breakdown.",
                "Centralise brand contacts in a shared inbox, not personal DMs.",
                "Reserve exclusivity clauses for the highest-paying partners only.",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_segment_has_five_tips() {
        for segment in [Segment::Casual, Segment::Emerging, Segment::Pro, Segment::Agency] {
            let tips = tips_for(segment);
            assert_eq!(tips.tips.len(), 5);
            assert!(!tips.level.is_empty());
            assert!(!tips.summary.is_empty());
            assert!(tips.tips.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn levels_are_distinct() {
        let levels: Vec<_> = [Segment::Casual, Segment::Emerging, Segment::Pro, Segment::Agency]
            .into_iter()
            .map(|s| tips_for(s).level)
            .collect();
        for (i, a) in levels.iter().enumerate() {
            for b in &levels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
