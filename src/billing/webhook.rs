use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use time::OffsetDateTime;

use crate::config::StripeConfig;
use crate::pricing::segment::{PlanTier, Segment};

/// Accepted clock skew between the signature timestamp and now.
const TOLERANCE_SECS: i64 = 300;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing timestamp in signature header")]
    MissingTimestamp,
    #[error("missing v1 signature in signature header")]
    MissingSignature,
    #[error("invalid timestamp format")]
    BadTimestamp,
    #[error("signature mismatch")]
    Mismatch,
    #[error("signature timestamp outside tolerance")]
    Stale,
}

/// Verifies Stripe-style webhook signatures: HMAC-SHA256 of
/// `"{timestamp}.{payload}"` keyed with the endpoint secret, compared in
/// constant time, with a freshness window on the timestamp.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        self.verify_at(
            payload,
            signature_header,
            OffsetDateTime::now_utc().unix_timestamp(),
        )
    }

    /// Header format: `t=<unix>,v1=<hex>[,v1=...]`.
    fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now_unix: i64,
    ) -> Result<(), SignatureError> {
        let mut timestamp: Option<&str> = None;
        let mut signatures: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            if let Some((key, value)) = part.trim().split_once('=') {
                match key {
                    "t" => timestamp = Some(value),
                    "v1" => signatures.push(value),
                    _ => {}
                }
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
        if signatures.is_empty() {
            return Err(SignatureError::MissingSignature);
        }

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SignatureError::Mismatch)?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if !signatures
            .iter()
            .any(|sig| constant_time_eq(sig.as_bytes(), expected.as_bytes()))
        {
            return Err(SignatureError::Mismatch);
        }

        let ts: i64 = timestamp.parse().map_err(|_| SignatureError::BadTimestamp)?;
        if (now_unix - ts).abs() > TOLERANCE_SECS {
            return Err(SignatureError::Stale);
        }

        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Raw event envelope as Stripe posts it.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    pub customer: Option<String>,
    pub customer_email: Option<String>,
    pub customer_details: Option<CustomerDetails>,
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

impl CheckoutSessionObject {
    pub fn payer_email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
            .or(self.customer_email.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,
    pub customer: String,
}

/// Infer the purchased tier from a completed payment. A configured
/// price-id mapping is authoritative; otherwise the paid amount is matched
/// against the known price points, falling back to the tier the user's
/// segment requires. 990/9900 cents is ambiguous between pro monthly/yearly
/// and agency monthly, so the user's segment breaks the tie.
pub fn infer_tier(
    amount_cents: i64,
    price_id: Option<&str>,
    segment: Segment,
    stripe: &StripeConfig,
) -> PlanTier {
    if let Some(pid) = price_id {
        if let Some(tier) = stripe.tier_for_price(pid) {
            return tier;
        }
    }
    match amount_cents {
        490 | 4900 => PlanTier::Emerging,
        990 | 9900 => {
            if segment == Segment::Agency {
                PlanTier::Agency
            } else {
                PlanTier::Pro
            }
        }
        19900 | 29900 | 39900 => PlanTier::Agency,
        _ => segment.required_tier(),
    }
}
