use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::types::DateRange;
use crate::{Error, Result};

/// Raw `/satellite` query string; fields stay text so that a missing
/// parameter and a malformed one are reported differently
#[derive(Debug, Default, Deserialize)]
pub struct SatelliteQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub hectares: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub version: String,
}

/// Defaults and limits applied to every image request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub default_hectares: f64,
    pub max_hectares: f64,
    pub default_dates: DateRange,
    pub safety_margin: f64,
    pub thumbnail_dimension: u32,
    pub environment: String,
}

impl RequestSettings {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            default_hectares: config.default_hectares,
            max_hectares: config.max_hectares,
            default_dates: DateRange::parse(
                &config.default_start_date,
                &config.default_end_date,
            )
            .map_err(|e| Error::Configuration(e.to_string()))?,
            safety_margin: config.safety_margin,
            thumbnail_dimension: config.thumbnail_dimension,
            environment: config.environment.clone(),
        })
    }
}
