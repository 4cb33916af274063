use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::error::{conflict_on_unique, ApiError};
use crate::pricing::segment::classify;
use crate::state::AppState;
use crate::users::{
    dto::{
        LoginRequest, SignupRequest, UpdateProfileRequest, UserIdResponse, UserQuery, UserResponse,
    },
    password::{hash_password, verify_password},
    repo::{NewUser, User},
};

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<UserIdResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let segment = classify(payload.followers, payload.profiles_count);

    let user = User::create(
        &state.db,
        NewUser {
            email: &payload.email,
            password_hash: &password_hash,
            main_platform: payload.main_platform.trim(),
            username: payload.username.trim(),
            followers: payload.followers,
            profiles_count: payload.profiles_count,
            segment,
        },
    )
    .await
    // The pre-check above can race a concurrent signup; the losing insert
    // hits the unique email index and must still read as a conflict.
    .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

    info!(user_id = %user.id, segment = %segment.as_str(), "user registered");
    Ok(Json(UserIdResponse { user_id: user.id }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<UserIdResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!(email = %payload.email, "login with unknown email");
        return Err(ApiError::Unauthorized);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Unauthorized);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(UserIdResponse { user_id: user.id }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_id(&state.db, query.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(UserResponse::from_user(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate()?;

    let segment = classify(payload.followers, payload.profiles_count);
    let user = User::update_profile(
        &state.db,
        payload.user_id,
        payload.followers,
        payload.profiles_count,
        segment,
    )
    .await?
    .ok_or(ApiError::NotFound("user"))?;

    info!(user_id = %user.id, segment = %segment.as_str(), "profile updated");
    Ok(Json(UserResponse::from_user(user)))
}
