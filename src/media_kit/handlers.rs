use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::media_kit::dto::{MediaKitResponse, ProfileTipsResponse};
use crate::pricing::{estimator, gate, tips};
use crate::state::AppState;
use crate::users::{dto::UserQuery, repo::User};

#[instrument(skip(state))]
pub async fn media_kit(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MediaKitResponse>, ApiError> {
    let user = User::find_by_id(&state.db, query.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let segment = user.current_segment();
    let kit = estimator::estimate(user.followers, segment, &user.main_platform);
    let decision = gate::evaluate(segment, user.current_plan_tier());

    Ok(Json(MediaKitResponse::build(user, kit, decision)))
}

#[instrument(skip(state))]
pub async fn profile_tips(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ProfileTipsResponse>, ApiError> {
    let user = User::find_by_id(&state.db, query.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let segment = user.current_segment();
    let decision = gate::evaluate(segment, user.current_plan_tier());

    Ok(Json(ProfileTipsResponse::build(
        segment,
        tips::tips_for(segment),
        decision,
    )))
}
