//! satellite_image_api - least-cloudy satellite snapshots over HTTP
//!
//! Given a point and an area in hectares, the service derives a circular
//! search region, asks Google Earth Engine for the least-cloudy Sentinel-2
//! scene (falling back to Landsat 8), and returns a true-color PNG.
//!
//! # Examples
//!
//! ## Area to search radius
//!
//! ```
//! use satellite_image_api::geo::{hectares_to_buffer_km, DEFAULT_SAFETY_MARGIN};
//!
//! let radius_km = hectares_to_buffer_km(100.0, DEFAULT_SAFETY_MARGIN)?;
//! assert!((radius_km - 0.6206).abs() < 1e-4);
//! # Ok::<(), satellite_image_api::Error>(())
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use satellite_image_api::api::{create_router, AppState, RequestSettings};
//! use satellite_image_api::config::{ServiceAccountCredentials, ServiceConfig};
//! use satellite_image_api::EarthEngineClient;
//!
//! # async fn run() -> satellite_image_api::Result<()> {
//! let config = ServiceConfig::from_env()?;
//! let credentials = ServiceAccountCredentials::from_env()?;
//! let client = EarthEngineClient::connect(&credentials, &config).await?;
//!
//! let state = AppState::new(client, RequestSettings::from_config(&config)?);
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, create_router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod earth_engine;
pub mod error;
pub mod geo;
pub mod imagery;
pub mod telemetry;
pub mod types;

pub use earth_engine::EarthEngineClient;
pub use error::{Error, Result};
pub use geo::{Coordinate, SearchRegion};
pub use imagery::{ImageryArchive, RenderedImage, SceneQuery, Selection};
pub use types::{DateRange, ImageRequest};
