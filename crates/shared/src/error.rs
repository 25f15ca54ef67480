use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Returns the server message when it carries any visible text.
    pub fn usable_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerField {
    Name,
    Email,
    Street,
    PostalCode,
    City,
}

impl CustomerField {
    pub fn label(self) -> &'static str {
        match self {
            CustomerField::Name => "Full Name",
            CustomerField::Email => "Email Address",
            CustomerField::Street => "Street",
            CustomerField::PostalCode => "Postal Code",
            CustomerField::City => "City",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(CustomerField),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
