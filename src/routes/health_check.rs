use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType, web};
use serde::Serialize;

use super::helpers::{error_chain_fmt, iso_timestamp};
use crate::startup::EnvironmentName;

#[derive(Serialize)]
struct HealthReport<'a> {
    status: &'a str,
    timestamp: String,
    environment: &'a str,
}

#[derive(thiserror::Error)]
pub enum HealthError {
    #[error("Failed to serialize the health report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl std::fmt::Debug for HealthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for HealthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error.cause_chain = ?self, error.message = %self, "Health check failed");
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }))
    }
}

#[tracing::instrument(name = "Health check", skip(environment))]
pub async fn health_check(
    environment: web::Data<EnvironmentName>,
) -> Result<HttpResponse, HealthError> {
    let report = serde_json::to_string(&HealthReport {
        status: "ok",
        timestamp: iso_timestamp(),
        environment: &environment.0,
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(report))
}
