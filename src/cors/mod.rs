mod middleware;
mod policy;

pub use middleware::apply_cors_policy;
pub use policy::{ALLOWED_HEADERS, ALLOWED_METHODS, AllowedOrigins, CorsDecision, CorsPolicy};
