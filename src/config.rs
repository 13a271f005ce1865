//! Environment-driven configuration

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::types::DateRange;
use crate::{Error, Result};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deployment name reported by the health check
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Earth Engine REST API root
    #[serde(default = "default_earth_engine_url")]
    pub earth_engine_url: String,

    /// Transport timeout for each outbound call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Largest accepted area, in hectares
    #[serde(default = "default_max_hectares")]
    pub max_hectares: f64,

    /// Longest side of the exported PNG, in pixels
    #[serde(default = "default_thumbnail_dimension")]
    pub thumbnail_dimension: u32,

    #[serde(default = "default_safety_margin")]
    pub safety_margin: f64,

    #[serde(default = "default_hectares")]
    pub default_hectares: f64,

    #[serde(default = "default_start_date")]
    pub default_start_date: String,

    #[serde(default = "default_end_date")]
    pub default_end_date: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5032
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_earth_engine_url() -> String {
    "https://earthengine.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_hectares() -> f64 {
    1_000_000.0
}

fn default_thumbnail_dimension() -> u32 {
    1024
}

fn default_safety_margin() -> f64 {
    crate::geo::DEFAULT_SAFETY_MARGIN
}

fn default_hectares() -> f64 {
    100.0
}

fn default_start_date() -> String {
    "2023-01-01".to_string()
}

fn default_end_date() -> String {
    "2025-03-20".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            environment: default_environment(),
            earth_engine_url: default_earth_engine_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_hectares: default_max_hectares(),
            thumbnail_dimension: default_thumbnail_dimension(),
            safety_margin: default_safety_margin(),
            default_hectares: default_hectares(),
            default_start_date: default_start_date(),
            default_end_date: default_end_date(),
        }
    }
}

impl ServiceConfig {
    /// Loads `SATELLITE_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(None)
    }

    /// Loads from `vars` instead of the process environment when given
    pub fn from_vars(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Environment::with_prefix("SATELLITE").source(vars))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.max_hectares.is_finite() && self.max_hectares > 0.0) {
            return Err(Error::Configuration("max_hectares must be positive".to_string()));
        }
        if !(self.default_hectares > 0.0 && self.default_hectares <= self.max_hectares) {
            return Err(Error::Configuration(
                "default_hectares must be positive and within max_hectares".to_string(),
            ));
        }
        if !(self.safety_margin.is_finite() && self.safety_margin >= 1.0) {
            return Err(Error::Configuration("safety_margin must be at least 1.0".to_string()));
        }
        if self.thumbnail_dimension == 0 {
            return Err(Error::Configuration("thumbnail_dimension must be positive".to_string()));
        }
        DateRange::parse(&self.default_start_date, &self.default_end_date)
            .map_err(|e| Error::Configuration(format!("invalid default date window: {}", e)))?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Service-account key material, read from `EE_*` variables
#[derive(Deserialize, Serialize, Clone)]
pub struct ServiceAccountCredentials {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub auth_uri: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub auth_provider_x509_cert_url: Option<String>,
    #[serde(default)]
    pub client_x509_cert_url: Option<String>,
    #[serde(default)]
    pub universe_domain: Option<String>,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(None)
    }

    pub fn from_vars(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let mut credentials: Self = Config::builder()
            .add_source(Environment::with_prefix("EE").source(vars))
            .build()?
            .try_deserialize()?;

        // Keys pasted into a single env line carry literal "\n" escapes
        credentials.private_key = credentials.private_key.replace("\\n", "\n");

        for (name, value) in [
            ("EE_PROJECT_ID", &credentials.project_id),
            ("EE_PRIVATE_KEY", &credentials.private_key),
            ("EE_CLIENT_EMAIL", &credentials.client_email),
            ("EE_TOKEN_URI", &credentials.token_uri),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("{} must not be empty", name)));
            }
        }

        Ok(credentials)
    }
}
