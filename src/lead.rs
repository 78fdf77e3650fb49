//! Demo request ("lead") validation.
//!
//! Mirrors the rules of the site's contact form and builds the JSON payload
//! the form posts. Sending it anywhere is left to the caller.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

use crate::config::ContactConfig;

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d\s\-+()]{10,}").unwrap());
static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A single failed rule. Display is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Введите ваше имя")]
    NameRequired,
    #[error("Введите номер телефона")]
    PhoneRequired,
    #[error("Минимум 10 цифр")]
    PhoneTooShort,
    #[error("Введите email")]
    EmailRequired,
    #[error("Введите корректный email")]
    EmailInvalid,
    #[error("Необходимо согласие на обработку данных")]
    ConsentRequired,
}

impl FieldError {
    /// Form field the error belongs to.
    pub const fn field(self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::PhoneRequired | Self::PhoneTooShort => "phone",
            Self::EmailRequired | Self::EmailInvalid => "email",
            Self::ConsentRequired => "consent",
        }
    }
}

/// Every rule the form broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lead form has {} invalid field(s)", .0.len())]
pub struct LeadErrors(pub Vec<FieldError>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub consent: bool,
}

/// Body posted to the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub consent: bool,
    pub to: String,
    pub subject: String,
}

impl LeadForm {
    /// Check all fields. Values are trimmed first.
    pub fn validate(&self) -> Result<(), LeadErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::NameRequired);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(FieldError::PhoneRequired);
        } else if !RE_PHONE.is_match(phone) {
            errors.push(FieldError::PhoneTooShort);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::EmailRequired);
        } else if !RE_EMAIL.is_match(email) {
            errors.push(FieldError::EmailInvalid);
        }

        if !self.consent {
            errors.push(FieldError::ConsentRequired);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LeadErrors(errors))
        }
    }

    /// Validate and address the lead to `contact`.
    pub fn into_submission(self, contact: &ContactConfig) -> Result<LeadSubmission, LeadErrors> {
        self.validate()?;
        Ok(LeadSubmission {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            consent: self.consent,
            to: contact.email.clone(),
            subject: contact.subject.clone(),
        })
    }
}
