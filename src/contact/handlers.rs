use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument, warn};

use crate::contact::{
    dto::{ContactRequest, ContactResponse},
    repo::Contact,
};
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let msg = payload.normalized()?;
    let contact = Contact::create(&state.db, &msg).await?;
    info!(contact_id = %contact.id, "contact message stored");

    // Forward to the operator best-effort: the record is already accepted,
    // so a delivery failure is logged and never surfaced to the caller.
    let email = state.email.clone();
    let recipient = state.config.email.contact_recipient.clone();
    let subject = format!("Contact form: {}", msg.subject);
    let body = format!(
        "From: {} <{}>\n\n{}",
        msg.name, msg.email, msg.message
    );
    let contact_id = contact.id;
    tokio::spawn(async move {
        if let Err(e) = email.send(&recipient, &subject, &body).await {
            warn!(error = %e, contact_id = %contact_id, "contact email forward failed");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            contact_id: contact.id,
            status: "received",
        }),
    ))
}
