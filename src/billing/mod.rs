use axum::{routing::post, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod stripe;
pub mod webhook;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-checkout-session", post(handlers::create_checkout_session))
        .route("/stripe-webhook", post(handlers::stripe_webhook))
        .route("/update-plan", post(handlers::update_plan))
}
