use crate::pricing::segment::PlanTier;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    /// Optional Stripe price ids per tier, used to resolve the purchased
    /// tier unambiguously from webhook payloads.
    pub price_emerging: Option<String>,
    pub price_pro: Option<String>,
    pub price_agency: Option<String>,
}

impl StripeConfig {
    pub fn tier_for_price(&self, price_id: &str) -> Option<PlanTier> {
        if self.price_emerging.as_deref() == Some(price_id) {
            return Some(PlanTier::Emerging);
        }
        if self.price_pro.as_deref() == Some(price_id) {
            return Some(PlanTier::Pro);
        }
        if self.price_agency.as_deref() == Some(price_id) {
            return Some(PlanTier::Agency);
        }
        None
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub resend_api_key: String,
    pub from_email: String,
    /// Operator address the contact form is forwarded to.
    pub contact_recipient: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub public_base_url: String,
    pub stripe: StripeConfig,
    pub email: EmailConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into());
        let stripe = StripeConfig {
            secret_key: std::env::var("STRIPE_SECRET_KEY")?,
            webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")?,
            price_emerging: std::env::var("STRIPE_PRICE_EMERGING").ok(),
            price_pro: std::env::var("STRIPE_PRICE_PRO").ok(),
            price_agency: std::env::var("STRIPE_PRICE_AGENCY").ok(),
        };
        let email = EmailConfig {
            resend_api_key: std::env::var("RESEND_API_KEY")?,
            from_email: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "ForCreators <noreply@forcreators.app>".into()),
            contact_recipient: std::env::var("CONTACT_EMAIL_TO")
                .unwrap_or_else(|_| "hello@forcreators.app".into()),
        };
        Ok(Self {
            database_url,
            public_base_url,
            stripe,
            email,
        })
    }
}
