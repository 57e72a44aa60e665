//! Configuration resolved once at startup and injected into components.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Graph API base used for outbound WhatsApp sends.
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// Service configuration.
///
/// All values come from the environment exactly once, in `from_env`; the
/// handlers and clients only ever see this struct.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Static secret for the webhook verify handshake.
    pub verify_token: String,
    /// Bearer credential for the WhatsApp Cloud API.
    pub access_token: SecretString,
    /// Phone-number-id path segment for the messages endpoint.
    pub phone_number_id: String,
    /// Graph API base URL (overridable so tests can stub the provider).
    pub graph_api_base: String,
    /// HTTP listen port.
    pub port: u16,
    /// Path to the contacts database file.
    pub db_path: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let verify_token = require("BOTOX_VERIFY_TOKEN")?;
        let access_token = SecretString::from(require("WHATSAPP_ACCESS_TOKEN")?);
        let phone_number_id = require("WHATSAPP_PHONE_NUMBER_ID")?;

        let graph_api_base = std::env::var("BOTOX_GRAPH_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GRAPH_API_BASE.to_string());

        let port = match std::env::var("BOTOX_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BOTOX_PORT".into(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 8080,
        };

        let db_path =
            std::env::var("BOTOX_DB_PATH").unwrap_or_else(|_| "./data/botox.db".to_string());

        Ok(Self {
            verify_token,
            access_token,
            phone_number_id,
            graph_api_base,
            port,
            db_path,
        })
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
