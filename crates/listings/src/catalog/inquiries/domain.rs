use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::properties::PropertyId;
use crate::catalog::validation::{looks_like_email, ValidationError, Violations};

pub(crate) const ENTITY: &str = "inquiry";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(pub i64);

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A prospect's contact request. `property_id` is a lookup key only; deleting the listing
/// leaves the inquiry in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub property_id: Option<PropertyId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn from_new(id: InquiryId, created_at: DateTime<Utc>, new: NewInquiry) -> Self {
        Self {
            id,
            property_id: new.property_id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            message: new.message,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub property_id: Option<PropertyId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDraft {
    pub property_id: Option<PropertyId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl InquiryDraft {
    pub fn validate(self) -> Result<NewInquiry, ValidationError> {
        let mut violations = Violations::new(ENTITY);

        let name = violations.required_text("name", self.name);
        if let Some(name) = &name {
            violations.min_chars("name", name, 2);
        }
        let email = violations.required_text("email", self.email);
        if matches!(&email, Some(email) if !looks_like_email(email)) {
            violations.push("email", "must be a valid email address");
        }
        let phone = violations.required_text("phone", self.phone);
        if let Some(phone) = &phone {
            violations.min_chars("phone", phone, 10);
        }
        let message = violations.required_text("message", self.message);
        if let Some(message) = &message {
            violations.min_chars("message", message, 10);
        }

        violations.finish()?;

        match (name, email, phone, message) {
            (Some(name), Some(email), Some(phone), Some(message)) => Ok(NewInquiry {
                property_id: self.property_id,
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                phone: phone.trim().to_string(),
                message,
            }),
            _ => Err(ValidationError::single(ENTITY, "body", "incomplete payload")),
        }
    }
}
