use shared::error::{ApiErrorBody, ValidationError};
use thiserror::Error;

use crate::transport::TransportError;

/// Fallback for non-success responses that carry no usable `message`.
pub const STATUS_FAILURE_MESSAGE: &str = "Something went wrong, failed to send request.";
/// Fallback for failures that produced no text at all.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        Self::Status {
            status,
            message: status_failure_message(body),
        }
    }

    pub fn user_message(&self) -> String {
        let message = match self {
            RequestError::Transport(err) => err.message.clone(),
            RequestError::Status { message, .. } => message.clone(),
            RequestError::Decode(err) => format!("failed to parse response: {err}"),
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Server-supplied `message` when the body is a JSON object carrying one, else the fallback.
pub fn status_failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.usable_message().map(str::to_string))
        .unwrap_or_else(|| STATUS_FAILURE_MESSAGE.to_string())
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cannot submit an order with an empty cart")]
    EmptyCart,
    #[error(transparent)]
    InvalidCustomer(#[from] ValidationError),
    #[error("failed to encode order: {0}")]
    Encode(#[from] serde_json::Error),
}
