use async_trait::async_trait;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Outbound email seam. The contact form forwards through this; delivery is
/// best-effort and failures are logged by the caller, never surfaced.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()>;
}

/// Resend HTTP API client.
pub struct ResendClient {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl EmailClient for ResendClient {
    async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "text": text,
        });

        let response = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("resend rejected the email: {status} {detail}");
        }

        debug!(to = %to, subject = %subject, "email sent");
        Ok(())
    }
}

/// No-delivery client used by `AppState::fake()`.
pub struct NoopEmail;

#[async_trait]
impl EmailClient for NoopEmail {
    async fn send(&self, _to: &str, _subject: &str, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
