use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::dto::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Trimmed, validated contact payload ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn normalized(&self) -> Result<ContactMessage, ApiError> {
        let name = self.name.trim();
        let email = self.email.trim().to_lowercase();
        let subject = self.subject.trim();
        let message = self.message.trim();

        if name.is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        if email.is_empty() {
            return Err(ApiError::Validation("email must not be empty".into()));
        }
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("email is not a valid address".into()));
        }
        if subject.is_empty() {
            return Err(ApiError::Validation("subject must not be empty".into()));
        }
        if message.is_empty() {
            return Err(ApiError::Validation("message must not be empty".into()));
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email,
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub contact_id: Uuid,
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "  Ada  ".into(),
            email: " Ada@Example.com ".into(),
            subject: "Collaboration".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn trims_and_lowercases() {
        let msg = request().normalized().unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
    }

    #[test]
    fn rejects_whitespace_only_fields() {
        for field in ["name", "subject", "message"] {
            let mut req = request();
            match field {
                "name" => req.name = "   ".into(),
                "subject" => req.subject = "\t".into(),
                _ => req.message = " \n ".into(),
            }
            assert!(req.normalized().is_err(), "{field} should be rejected");
        }
    }

    #[test]
    fn rejects_invalid_email() {
        let mut req = request();
        req.email = "not-an-email".into();
        assert!(req.normalized().is_err());
    }
}
