//! API configuration

use serde::{Deserialize, Serialize};

use core_kernel::Timezone;
use domain_registration::HttpMembershipConfig;

/// API configuration
///
/// Every field can be overridden with an `API_`-prefixed environment
/// variable, e.g. `API_PORT=9000` or `API_MEMBERSHIP_BASE_URL=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// IANA zone that decides which day "today" is, e.g. for code validity
    pub timezone: Timezone,
    /// USA Lacrosse membership API; verification reports unavailable when unset
    pub membership_base_url: Option<String>,
    pub membership_api_key: Option<String>,
    pub membership_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            timezone: Timezone::default(),
            membership_base_url: None,
            membership_api_key: None,
            membership_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&ApiConfig::default())?)
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the membership adapter, if a service is configured
    pub fn membership(&self) -> Option<HttpMembershipConfig> {
        let base_url = self.membership_base_url.as_deref()?.trim();
        if base_url.is_empty() {
            return None;
        }
        Some(HttpMembershipConfig {
            base_url: base_url.to_string(),
            api_key: self.membership_api_key.clone().unwrap_or_default(),
            timeout_secs: self.membership_timeout_secs,
        })
    }
}
