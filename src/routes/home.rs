use actix_web::{HttpResponse, web};
use serde::Serialize;

use super::helpers::iso_timestamp;
use crate::startup::EnvironmentName;

pub const SERVICE_NAME: &str = "Solar Site Backend API";

const ENDPOINTS: [&str; 2] = [
    "GET /api/health - Health check",
    "POST /api/contact - Contact form submission",
];

#[derive(Serialize)]
struct ServiceInfo<'a> {
    message: &'a str,
    status: &'a str,
    timestamp: String,
    environment: &'a str,
    endpoints: &'a [&'a str],
}

#[tracing::instrument(name = "Describing the service", skip(environment))]
pub async fn home(environment: web::Data<EnvironmentName>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        message: SERVICE_NAME,
        status: "running",
        timestamp: iso_timestamp(),
        environment: &environment.0,
        endpoints: &ENDPOINTS,
    })
}
