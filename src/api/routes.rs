use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::*;
use super::AppState;
use crate::imagery::ImageryArchive;

pub fn create_router<A: ImageryArchive>(state: AppState<A>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check::<A>))
        .route("/satellite", get(get_satellite_image::<A>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
