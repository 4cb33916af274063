use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::pricing::segment::{classify, PlanTier, Segment};

const USER_COLUMNS: &str = "id, email, password_hash, main_platform, username, \
     followers, profiles_count, segment, paid_plan, stripe_customer_id, created_at";

/// User record. `segment` is derived from followers/profiles and written in
/// the same statement as any change to them; `paid_plan` only moves via
/// payment events or admin override.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub main_platform: String,
    pub username: String,
    pub followers: i64,
    pub profiles_count: i32,
    pub segment: String,
    pub paid_plan: String,
    pub stripe_customer_id: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub main_platform: &'a str,
    pub username: &'a str,
    pub followers: i64,
    pub profiles_count: i32,
    pub segment: Segment,
}

impl User {
    pub fn current_segment(&self) -> Segment {
        // Stored text should always parse; reclassifying is the safe
        // fallback because segment is a pure function of the counts anyway.
        Segment::parse(&self.segment)
            .unwrap_or_else(|| classify(self.followers, self.profiles_count))
    }

    pub fn current_plan_tier(&self) -> PlanTier {
        PlanTier::parse(&self.paid_plan).unwrap_or(PlanTier::Free)
    }

    pub fn premium(&self) -> bool {
        self.current_plan_tier() != PlanTier::Free
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_stripe_customer(
        db: &PgPool,
        customer_id: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE stripe_customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(db: &PgPool, new: NewUser<'_>) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users \
                 (email, password_hash, main_platform, username, followers, profiles_count, segment) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.main_platform)
        .bind(new.username)
        .bind(new.followers)
        .bind(new.profiles_count)
        .bind(new.segment.as_str())
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Replace followers/profiles and the re-derived segment in one
    /// statement, so the pair can never diverge and concurrent writers
    /// cannot interleave within the record.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        followers: i64,
        profiles_count: i32,
        segment: Segment,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET followers = $2, profiles_count = $3, segment = $4 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(followers)
        .bind(profiles_count)
        .bind(segment.as_str())
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn update_paid_plan(
        db: &PgPool,
        id: Uuid,
        tier: PlanTier,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET paid_plan = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(tier.as_str())
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn set_stripe_customer(
        db: &PgPool,
        id: Uuid,
        customer_id: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET stripe_customer_id = $2 WHERE id = $1")
            .bind(id)
            .bind(customer_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(segment: &str, paid_plan: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "creator@example.com".into(),
            password_hash: "$argon2id$fake".into(),
            main_platform: "instagram".into(),
            username: "creator".into(),
            followers: 5_000,
            profiles_count: 1,
            segment: segment.into(),
            paid_plan: paid_plan.into(),
            stripe_customer_id: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn stored_segment_and_plan_parse() {
        let user = sample_user("emerging", "pro");
        assert_eq!(user.current_segment(), Segment::Emerging);
        assert_eq!(user.current_plan_tier(), PlanTier::Pro);
        assert!(user.premium());
    }

    #[test]
    fn unparseable_segment_falls_back_to_reclassification() {
        let user = sample_user("corrupted", "free");
        // 5,000 followers, single profile: emerging.
        assert_eq!(user.current_segment(), Segment::Emerging);
        assert_eq!(user.current_plan_tier(), PlanTier::Free);
        assert!(!user.premium());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&sample_user("casual", "free")).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
