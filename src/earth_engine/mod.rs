//! Google Earth Engine REST client
//!
//! Authenticates as a service account, evaluates computation graphs and
//! downloads rendered thumbnails. [`EarthEngineClient`] is the production
//! [`ImageryArchive`](crate::imagery::ImageryArchive).

pub mod auth;
pub mod client;
pub mod expression;

pub use auth::{AccessToken, TokenProvider, EARTH_ENGINE_SCOPES};
pub use client::EarthEngineClient;
pub use expression::{Expression, ValueNode};
