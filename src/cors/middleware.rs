use actix_web::{
    HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
    middleware::Next,
    web,
};

use super::CorsPolicy;
use crate::routes::e500;

/// Answers preflight requests directly and stamps the CORS headers on every
/// other response, errors included.
pub async fn apply_cors_policy(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    let policy = req
        .app_data::<web::Data<CorsPolicy>>()
        .cloned()
        .ok_or_else(|| e500("CORS policy is not registered"))?;

    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    let decision = policy.evaluate(origin);

    if let (Some(origin), false) = (origin, decision.allowed) {
        tracing::debug!(%origin, "Origin is not in the CORS allow-list");
    }

    if *req.method() == Method::OPTIONS {
        let mut response = HttpResponse::Ok().finish();
        decision.apply(response.headers_mut(), true);
        return Ok(req.into_response(response));
    }

    let mut response = next.call(req).await?.map_into_boxed_body();
    decision.apply(response.headers_mut(), false);
    Ok(response)
}
