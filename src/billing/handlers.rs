use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, info, instrument, warn};

use crate::billing::{
    dto::{
        BillingPeriod, CheckoutRequest, CheckoutResponse, UpdatePlanRequest, UpdatePlanResponse,
    },
    stripe::CheckoutParams,
    webhook::{
        infer_tier, CheckoutSessionObject, StripeEvent, SubscriptionObject, WebhookVerifier,
    },
};
use crate::error::ApiError;
use crate::pricing::{plan::quote_plan, segment::PlanTier};
use crate::state::AppState;
use crate::users::repo::User;

#[instrument(skip(state, payload))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let user = User::find_by_id(&state.db, payload.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let segment = user.current_segment();
    let quote = quote_plan(segment, user.profiles_count);
    let (amount, period_label) = match payload.billing_period {
        BillingPeriod::Monthly => (quote.monthly_price, "monthly"),
        BillingPeriod::Yearly => (quote.yearly_price.unwrap_or(0.0), "yearly"),
    };

    if amount <= 0.0 {
        return Err(ApiError::Validation(format!(
            "the {} plan has no {period_label} price to pay",
            segment.as_str()
        )));
    }

    let base = state.config.public_base_url.trim_end_matches('/');
    let session = state
        .stripe
        .create_checkout_session(CheckoutParams {
            customer_email: &user.email,
            product_name: &format!("{} ({period_label})", quote.label),
            unit_amount_cents: (amount * 100.0).round() as i64,
            user_id: user.id,
            success_url: format!("{base}/?checkout=success"),
            cancel_url: format!("{base}/?checkout=cancelled"),
        })
        .await?;

    let checkout_url = session
        .url
        .ok_or_else(|| ApiError::Upstream("checkout session has no redirect url".into()))?;

    info!(user_id = %user.id, session_id = %session.id, "checkout session created");
    Ok(Json(CheckoutResponse { checkout_url }))
}

/// Signature-verified Stripe webhook. Verification happens before anything
/// else; a payload that fails it must never touch the user store. Unknown
/// payers are logged and acknowledged without creating state.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Validation("missing stripe-signature header".into()))?;

    WebhookVerifier::new(state.config.stripe.webhook_secret.as_str())
        .verify(&body, signature)
        .map_err(|e| {
            warn!(error = %e, "webhook signature verification failed");
            ApiError::Validation(e.to_string())
        })?;

    let event: StripeEvent = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("malformed webhook payload: {e}")))?;

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let session: CheckoutSessionObject = serde_json::from_value(event.data.object)
                .map_err(|e| ApiError::Validation(format!("malformed checkout session: {e}")))?;
            handle_checkout_completed(&state, session).await?;
        }
        "customer.subscription.deleted" => {
            let subscription: SubscriptionObject = serde_json::from_value(event.data.object)
                .map_err(|e| ApiError::Validation(format!("malformed subscription: {e}")))?;
            handle_subscription_deleted(&state, subscription).await?;
        }
        other => {
            debug!(event_id = %event.id, event_type = %other, "ignoring webhook event");
        }
    }

    Ok(StatusCode::OK)
}

async fn handle_checkout_completed(
    state: &AppState,
    session: CheckoutSessionObject,
) -> Result<(), ApiError> {
    let Some(email) = session.payer_email() else {
        warn!(session_id = %session.id, "checkout completed without a payer email; ignoring");
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(session_id = %session.id, "payment from unknown email; ignoring");
        return Ok(());
    };

    let amount = session.amount_total.unwrap_or(0);
    let price_id = session.metadata.get("price_id").map(String::as_str);
    let tier = infer_tier(amount, price_id, user.current_segment(), &state.config.stripe);

    if let Some(customer) = &session.customer {
        User::set_stripe_customer(&state.db, user.id, customer).await?;
    }
    User::update_paid_plan(&state.db, user.id, tier).await?;

    info!(
        user_id = %user.id,
        amount_cents = amount,
        tier = %tier.as_str(),
        "paid plan upgraded from checkout"
    );
    Ok(())
}

async fn handle_subscription_deleted(
    state: &AppState,
    subscription: SubscriptionObject,
) -> Result<(), ApiError> {
    let Some(user) = User::find_by_stripe_customer(&state.db, &subscription.customer).await? else {
        warn!(
            subscription_id = %subscription.id,
            "cancellation for unknown customer; ignoring"
        );
        return Ok(());
    };

    User::update_paid_plan(&state.db, user.id, PlanTier::Free).await?;
    info!(user_id = %user.id, "paid plan reset to free after cancellation");
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn update_plan(
    State(state): State<AppState>,
    Json(payload): Json<UpdatePlanRequest>,
) -> Result<Json<UpdatePlanResponse>, ApiError> {
    let tier = PlanTier::parse(&payload.new_plan)
        .ok_or_else(|| ApiError::Validation(format!("unknown plan tier: {}", payload.new_plan)))?;

    let user = User::update_paid_plan(&state.db, payload.user_id, tier)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    info!(user_id = %user.id, tier = %tier.as_str(), "paid plan set by admin override");
    Ok(Json(UpdatePlanResponse {
        user_id: user.id,
        paid_plan: tier,
        premium: tier != PlanTier::Free,
    }))
}
