use serde::Serialize;

use super::segment::Segment;

/// Platform used for view multipliers and per-1000-follower post rates.
/// Anything unrecognised (including "other") gets instagram behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    Twitch,
}

impl Platform {
    pub fn parse(raw: &str) -> Platform {
        match raw.trim().to_lowercase().as_str() {
            "tiktok" => Platform::TikTok,
            "youtube" => Platform::YouTube,
            "twitch" => Platform::Twitch,
            _ => Platform::Instagram,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Twitch => "twitch",
        }
    }

    fn view_multiplier(&self) -> f64 {
        match self {
            Platform::Instagram => 1.0,
            Platform::TikTok => 1.4,
            Platform::YouTube => 2.5,
            Platform::Twitch => 1.0,
        }
    }

    /// Suggested post rate in EUR per 1,000 followers.
    fn post_rate_per_1000(&self) -> f64 {
        match self {
            Platform::Instagram => 10.0,
            Platform::TikTok => 9.0,
            Platform::YouTube => 20.0,
            Platform::Twitch => 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEstimates {
    pub post_avg_views: i64,
    pub story_avg_views: i64,
}

/// Suggested point prices in EUR. Post is floored at 5.00, story at 3.00;
/// the bundle (1 post + 3 stories) carries a 20% discount off the naive sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedRates {
    pub single_post: f64,
    pub single_story: f64,
    pub bundle_post_3_stories: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaKitEstimate {
    pub platform: Platform,
    pub estimated: ViewEstimates,
    pub rates: SuggestedRates,
}

const MIN_POST_PRICE: f64 = 5.0;
const MIN_STORY_PRICE: f64 = 3.0;
const BUNDLE_DISCOUNT: f64 = 0.8;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fraction of followers expected to view a post / a story, per segment.
fn base_view_rates(segment: Segment) -> (f64, f64) {
    match segment {
        Segment::Casual => (0.25, 0.08),
        Segment::Emerging => (0.20, 0.05),
        Segment::Pro => (0.12, 0.03),
        Segment::Agency => (0.10, 0.02),
    }
}

/// Compute the media-kit estimate. Pure and total: negative follower counts
/// are clamped to zero, which yields the floor prices.
pub fn estimate(followers: i64, segment: Segment, platform: &str) -> MediaKitEstimate {
    let followers = followers.max(0) as f64;
    let platform = Platform::parse(platform);
    let (post_rate, story_rate) = base_view_rates(segment);
    let multiplier = platform.view_multiplier();

    let post_avg_views = (followers * post_rate * multiplier).floor() as i64;
    let story_avg_views = (followers * story_rate * multiplier).floor() as i64;

    let single_post = round2((followers / 1000.0 * platform.post_rate_per_1000()).max(MIN_POST_PRICE));
    let single_story = round2((single_post * 0.5).max(MIN_STORY_PRICE));
    let bundle_post_3_stories = round2(BUNDLE_DISCOUNT * (single_post + 3.0 * single_story));

    MediaKitEstimate {
        platform,
        estimated: ViewEstimates {
            post_avg_views,
            story_avg_views,
        },
        rates: SuggestedRates {
            single_post,
            single_story,
            bundle_post_3_stories,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_followers_yield_floor_prices() {
        let kit = estimate(0, Segment::Casual, "instagram");
        assert_eq!(kit.rates.single_post, 5.00);
        assert_eq!(kit.rates.single_story, 3.00);
        assert_eq!(kit.rates.bundle_post_3_stories, 11.20);
        assert_eq!(kit.estimated.post_avg_views, 0);
        assert_eq!(kit.estimated.story_avg_views, 0);
    }

    #[test]
    fn negative_followers_are_clamped() {
        assert_eq!(estimate(-42, Segment::Pro, "instagram"), estimate(0, Segment::Pro, "instagram"));
    }

    #[test]
    fn instagram_emerging_5000_followers() {
        let kit = estimate(5_000, Segment::Emerging, "instagram");
        // 5000/1000 * 10.0 = 50.00 per post
        assert_eq!(kit.rates.single_post, 50.00);
        assert_eq!(kit.rates.single_story, 25.00);
        // 0.8 * (50 + 3 * 25)
        assert_eq!(kit.rates.bundle_post_3_stories, 100.00);
        assert_eq!(kit.estimated.post_avg_views, 1_000);
        assert_eq!(kit.estimated.story_avg_views, 250);
    }

    #[test]
    fn tiktok_multiplier_applies_to_views_only_rate_to_price() {
        let kit = estimate(10_000, Segment::Emerging, "TikTok");
        // views: 10000 * 0.20 * 1.4 and 10000 * 0.05 * 1.4
        assert_eq!(kit.estimated.post_avg_views, 2_800);
        assert_eq!(kit.estimated.story_avg_views, 700);
        // price: 10 * 9.0 = 90, story 45, bundle 0.8 * (90 + 135)
        assert_eq!(kit.rates.single_post, 90.00);
        assert_eq!(kit.rates.single_story, 45.00);
        assert_eq!(kit.rates.bundle_post_3_stories, 180.00);
    }

    #[test]
    fn youtube_views_are_scaled_2_5x() {
        let kit = estimate(1_000, Segment::Casual, "youtube");
        assert_eq!(kit.estimated.post_avg_views, 625);
        assert_eq!(kit.estimated.story_avg_views, 200);
        assert_eq!(kit.rates.single_post, 20.00);
    }

    #[test]
    fn unknown_platform_behaves_like_instagram() {
        let unknown = estimate(3_000, Segment::Emerging, "mastodon");
        let instagram = estimate(3_000, Segment::Emerging, "instagram");
        assert_eq!(unknown, instagram);
        assert_eq!(unknown.platform, Platform::Instagram);
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!(Platform::parse("  YouTube "), Platform::YouTube);
        assert_eq!(Platform::parse("TWITCH"), Platform::Twitch);
        assert_eq!(Platform::parse(""), Platform::Instagram);
    }

    #[test]
    fn prices_never_fall_below_floors() {
        for followers in [0, 1, 10, 100, 499, 999] {
            for platform in ["instagram", "tiktok", "youtube", "twitch", "other"] {
                for segment in [Segment::Casual, Segment::Emerging, Segment::Pro, Segment::Agency] {
                    let kit = estimate(followers, segment, platform);
                    assert!(kit.rates.single_post >= 5.00);
                    assert!(kit.rates.single_story >= 3.00);
                }
            }
        }
    }

    #[test]
    fn story_is_half_the_post_price_above_the_floor() {
        let kit = estimate(50_000, Segment::Pro, "instagram");
        assert_eq!(kit.rates.single_post, 500.00);
        assert_eq!(kit.rates.single_story, 250.00);
    }
}
