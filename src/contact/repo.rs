use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::contact::dto::ContactMessage;

/// Contact record. Insert-only; never mutated or read back by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl Contact {
    pub async fn create(db: &PgPool, msg: &ContactMessage) -> anyhow::Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, subject, message, created_at
            "#,
        )
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.subject)
        .bind(&msg.message)
        .fetch_one(db)
        .await?;
        Ok(contact)
    }
}
