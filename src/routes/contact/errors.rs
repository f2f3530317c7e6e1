use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::multipart::DecodeError;
use crate::email_client::SendEmailError;
use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    ValidationError(String),
    #[error("Email service not configured")]
    ServiceUnavailable,
    #[error("Failed to send email")]
    DispatchFailure(#[source] SendEmailError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Decode(_) | ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::ServiceUnavailable
            | ContactError::DispatchFailure(_)
            | ContactError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Contact form submission failed"
            );
        }

        let body = match self {
            ContactError::Decode(e @ DecodeError::PayloadTooLarge { .. }) => {
                serde_json::json!({ "error": "File too large", "details": e.to_string() })
            }
            ContactError::Decode(e @ DecodeError::Malformed(_)) => {
                serde_json::json!({ "error": "File upload error", "details": e.to_string() })
            }
            ContactError::ValidationError(_) => {
                serde_json::json!({ "error": "Missing required fields" })
            }
            ContactError::ServiceUnavailable => {
                serde_json::json!({ "error": "Email service not configured" })
            }
            ContactError::DispatchFailure(e) => {
                serde_json::json!({ "error": "Failed to send email", "details": e.to_string() })
            }
            ContactError::UnexpectedError(_) => {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        HttpResponse::build(status).json(body)
    }
}
