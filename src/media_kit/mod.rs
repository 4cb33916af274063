use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/media-kit", get(handlers::media_kit))
        .route("/profile-tips", get(handlers::profile_tips))
}
