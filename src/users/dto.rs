use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::pricing::plan::PlanQuote;
use crate::pricing::segment::{PlanTier, Segment};
use crate::users::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub main_platform: String,
    pub username: String,
    pub followers: i64,
    #[serde(default = "default_profiles_count")]
    pub profiles_count: i32,
}

fn default_profiles_count() -> i32 {
    1
}

impl SignupRequest {
    /// Field-level validation; email is expected to be trimmed and
    /// lowercased by the handler before this runs.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("email is not a valid address".into()));
        }
        if self.password.len() < 8 {
            return Err(ApiError::Validation(
                "password must be at least 8 characters".into(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(ApiError::Validation("username must not be empty".into()));
        }
        if self.main_platform.trim().is_empty() {
            return Err(ApiError::Validation("main_platform must not be empty".into()));
        }
        if self.followers < 0 {
            return Err(ApiError::Validation("followers must be >= 0".into()));
        }
        if self.profiles_count < 1 {
            return Err(ApiError::Validation("profiles_count must be >= 1".into()));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for follower/profile updates.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: Uuid,
    pub followers: i64,
    pub profiles_count: i32,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.followers < 0 {
            return Err(ApiError::Validation("followers must be >= 0".into()));
        }
        if self.profiles_count < 1 {
            return Err(ApiError::Validation("profiles_count must be >= 1".into()));
        }
        Ok(())
    }
}

/// Query string for user-scoped GET endpoints.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub user_id: Uuid,
}

/// Public user view: everything but the credential, plus the derived plan
/// quote and premium flag.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub main_platform: String,
    pub username: String,
    pub followers: i64,
    pub profiles_count: i32,
    pub segment: Segment,
    pub segment_label: &'static str,
    pub plan: PlanQuote,
    pub paid_plan: PlanTier,
    pub premium: bool,
    pub created_at: OffsetDateTime,
}

impl UserResponse {
    pub fn from_user(user: User) -> Self {
        let segment = user.current_segment();
        let plan = crate::pricing::plan::quote_plan(segment, user.profiles_count);
        let paid_plan = user.current_plan_tier();
        let premium = user.premium();
        Self {
            user_id: user.id,
            email: user.email,
            main_platform: user.main_platform,
            username: user.username,
            followers: user.followers,
            profiles_count: user.profiles_count,
            segment,
            segment_label: segment.label(),
            plan,
            paid_plan,
            premium,
            created_at: user.created_at,
        }
    }
}
