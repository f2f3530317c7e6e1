use actix_web::http::header::{self, HeaderMap, HeaderValue};

pub const ALLOWED_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];
pub const ALLOWED_HEADERS: &[&str] = &[
    "Origin",
    "X-Requested-With",
    "Content-Type",
    "Accept",
    "Authorization",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parses `*` or a comma separated list of origins. A `*` anywhere in the
    /// list widens the policy to any origin.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: AllowedOrigins,
    allow_credentials: bool,
    max_age_secs: u64,
}

/// What to tell the browser about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsDecision {
    pub allowed: bool,
    pub allowed_origin: Option<String>,
    pub allowed_methods: &'static [&'static str],
    pub allowed_headers: &'static [&'static str],
    pub allow_credentials: bool,
    pub vary_origin: bool,
    pub max_age_secs: u64,
}

impl CorsPolicy {
    pub fn new(origins: AllowedOrigins, allow_credentials: bool, max_age_secs: u64) -> Self {
        Self {
            origins,
            allow_credentials,
            max_age_secs,
        }
    }

    pub fn evaluate(&self, origin: Option<&str>) -> CorsDecision {
        let (allowed_origin, allow_credentials, vary_origin) = match &self.origins {
            // Credentials are never combined with a wildcard origin.
            AllowedOrigins::Any => (Some("*".to_string()), false, false),
            AllowedOrigins::List(list) => match origin {
                Some(origin) if list.iter().any(|allowed| allowed == origin) => {
                    (Some(origin.to_string()), self.allow_credentials, true)
                }
                _ => (None, false, true),
            },
        };

        CorsDecision {
            allowed: allowed_origin.is_some(),
            allowed_origin,
            allowed_methods: ALLOWED_METHODS,
            allowed_headers: ALLOWED_HEADERS,
            allow_credentials,
            vary_origin,
            max_age_secs: self.max_age_secs,
        }
    }
}

impl CorsDecision {
    pub fn apply(&self, headers: &mut HeaderMap, preflight: bool) {
        if let Some(value) = self
            .allowed_origin
            .as_deref()
            .and_then(|origin| HeaderValue::from_str(origin).ok())
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.allowed_methods.join(", ")) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.allowed_headers.join(", ")) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if self.vary_origin {
            headers.append(header::VARY, HeaderValue::from_static("Origin"));
        }
        if preflight {
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age_secs));
        }
    }
}
