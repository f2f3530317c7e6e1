use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::cors::{AllowedOrigins, CorsPolicy};
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;

pub const DEFAULT_ENVIRONMENT: &str = "production";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub cors: CorsSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub api_key: Option<SecretString>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl EmailClientSettings {
    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        EmailClient::new(&self.base_url, self.api_key(), self.timeout())
    }

    pub fn sender(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.recipient_email.clone())
    }

    /// A blank key counts as missing.
    pub fn api_key(&self) -> Option<SecretString> {
        self.api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct CorsSettings {
    /// `*` or a comma separated list of origins.
    pub allowed_origins: String,
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_age_secs: u64,
}

impl CorsSettings {
    pub fn policy(&self) -> CorsPolicy {
        CorsPolicy::new(
            AllowedOrigins::parse(&self.allowed_origins),
            self.allow_credentials,
            self.max_age_secs,
        )
    }
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.into()
}

fn default_allow_credentials() -> bool {
    true
}

/// Layers `configuration/base`, `configuration/<environment>`, `APP_*`
/// variables and finally the deployment variables the hosting platform sets.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let conf_dir = base_path.join("configuration");
    let environment = std::env::var("EXECUTION_ENVIRONMENT_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(default_environment);

    let settings = config::Config::builder()
        .add_source(
            config::File::with_name(&conf_dir.join("base").to_string_lossy()).required(true),
        )
        .add_source(
            config::File::with_name(&conf_dir.join(&environment).to_string_lossy())
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .set_override("app.environment", environment)?
        .set_override_option("app.port", std::env::var("LISTEN_PORT").ok())?
        .set_override_option(
            "email_client.api_key",
            std::env::var("EMAIL_PROVIDER_API_KEY").ok(),
        )?
        .set_override_option("cors.allowed_origins", std::env::var("ALLOWED_ORIGINS").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
