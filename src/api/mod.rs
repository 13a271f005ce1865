//! HTTP surface: `/satellite`, `/health` and a service index

pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

pub use models::RequestSettings;
pub use routes::create_router;

/// Shared request-handler state.
///
/// Holds the read-only archive handle built at startup; cloning is cheap.
#[derive(Debug)]
pub struct AppState<A> {
    pub archive: Arc<A>,
    pub settings: Arc<RequestSettings>,
}

impl<A> AppState<A> {
    pub fn new(archive: A, settings: RequestSettings) -> Self {
        Self {
            archive: Arc::new(archive),
            settings: Arc::new(settings),
        }
    }
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            archive: Arc::clone(&self.archive),
            settings: Arc::clone(&self.settings),
        }
    }
}
