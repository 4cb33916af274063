use serde::Deserialize;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::error::ApiError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Thin Stripe REST client: form-encoded requests authenticated with the
/// secret key.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
}

/// Inputs for a one-off checkout session priced inline (`price_data`).
#[derive(Debug)]
pub struct CheckoutParams<'a> {
    pub customer_email: &'a str,
    pub product_name: &'a str,
    pub unit_amount_cents: i64,
    pub user_id: Uuid,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

pub(crate) fn checkout_form(params: &CheckoutParams<'_>) -> Vec<(&'static str, String)> {
    vec![
        ("mode", "payment".to_string()),
        ("customer_email", params.customer_email.to_string()),
        ("success_url", params.success_url.clone()),
        ("cancel_url", params.cancel_url.clone()),
        ("line_items[0][quantity]", "1".to_string()),
        ("line_items[0][price_data][currency]", "eur".to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            params.product_name.to_string(),
        ),
        (
            "line_items[0][price_data][unit_amount]",
            params.unit_amount_cents.to_string(),
        ),
        ("metadata[user_id]", params.user_id.to_string()),
    ]
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
        }
    }

    async fn stripe_request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{STRIPE_API_BASE}{endpoint}");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "stripe request failed");
                ApiError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "stripe api error");
            return Err(ApiError::Upstream(format!("stripe api error: {status}")));
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "failed to parse stripe response");
            ApiError::Upstream(e.to_string())
        })
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn create_checkout_session(
        &self,
        params: CheckoutParams<'_>,
    ) -> Result<CheckoutSession, ApiError> {
        debug!(amount_cents = params.unit_amount_cents, "creating checkout session");
        let form = checkout_form(&params);
        self.stripe_request("/checkout/sessions", &form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_form_carries_inline_price_and_metadata() {
        let user_id = Uuid::new_v4();
        let params = CheckoutParams {
            customer_email: "creator@example.com",
            product_name: "Creator Pro - structured collaborations (monthly)",
            unit_amount_cents: 990,
            user_id,
            success_url: "http://localhost:8080/?checkout=success".into(),
            cancel_url: "http://localhost:8080/?checkout=cancelled".into(),
        };
        let form = checkout_form(&params);

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("990"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("eur"));
        assert_eq!(get("metadata[user_id]"), Some(user_id.to_string().as_str()));
        assert_eq!(get("customer_email"), Some("creator@example.com"));
    }
}
