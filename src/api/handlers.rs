use axum::{
    extract::{Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

use super::models::*;
use super::AppState;
use crate::geo::Coordinate;
use crate::imagery::{fetch_least_cloudy, ImageryArchive, RenderedImage, Selection};
use crate::types::{DateRange, ImageRequest};
use crate::{Error, Result};

/// Names the archive the returned scene was taken from
pub const IMAGERY_COLLECTION_HEADER: HeaderName =
    HeaderName::from_static("x-imagery-collection");

fn error_response(err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub async fn get_satellite_image<A: ImageryArchive>(
    State(state): State<AppState<A>>,
    Query(query): Query<SatelliteQuery>,
) -> std::result::Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let request = parse_request(&query, &state.settings).map_err(|e| {
        error!("Rejected satellite request: {}", e);
        error_response(&e)
    })?;

    info!(
        latitude = request.latitude(),
        longitude = request.longitude(),
        hectares = request.hectares,
        "Processing request for satellite image"
    );

    match retrieve_image(state.archive.as_ref(), &request, &state.settings).await {
        Ok(image) => {
            info!(
                collection = image.collection.id,
                bytes = image.bytes.len(),
                "Successfully generated satellite image"
            );

            let disposition = format!("attachment; filename={}", request.filename());
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::IMAGE_PNG.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                    (IMAGERY_COLLECTION_HEADER, image.collection.id.to_string()),
                ],
                image.bytes,
            )
                .into_response())
        }
        Err(e) => {
            error!("Error processing satellite request: {}", e);
            Err(error_response(&e))
        }
    }
}

pub async fn health_check<A: ImageryArchive>(
    State(state): State<AppState<A>>,
) -> Json<HealthResponse> {
    info!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        environment: state.settings.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Satellite Image API",
        "endpoints": {
            "/satellite": "Get satellite imagery \
                (params: latitude, longitude, hectares, start_date, end_date)",
            "/health": "Health check"
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Validates the query string and fills in defaults
pub fn parse_request(query: &SatelliteQuery, settings: &RequestSettings) -> Result<ImageRequest> {
    let (latitude, longitude) = match (non_empty(&query.latitude), non_empty(&query.longitude)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(Error::Validation(
                "Latitude and longitude are required parameters".to_string(),
            ))
        }
    };

    let numeric = || {
        Error::Validation("Latitude, longitude, and hectares must be numeric values".to_string())
    };
    let latitude: f64 = latitude.trim().parse().map_err(|_| numeric())?;
    let longitude: f64 = longitude.trim().parse().map_err(|_| numeric())?;
    let hectares: f64 = match query.hectares.as_deref() {
        Some(text) => text.trim().parse().map_err(|_| numeric())?,
        None => settings.default_hectares,
    };

    let location = Coordinate::try_from_lonlat(longitude, latitude)?;

    if !hectares.is_finite() || hectares <= 0.0 {
        return Err(Error::Validation(format!(
            "Hectares must be a positive number, got {}",
            hectares
        )));
    }
    if hectares > settings.max_hectares {
        return Err(Error::Validation(format!(
            "Hectares must not exceed {}, got {}",
            settings.max_hectares, hectares
        )));
    }

    let dates = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (None, None) => settings.default_dates,
        (start, end) => {
            let default_start = settings.default_dates.start_str();
            let default_end = settings.default_dates.end_str();
            DateRange::parse(start.unwrap_or(&default_start), end.unwrap_or(&default_end))?
        }
    };

    Ok(ImageRequest {
        location,
        hectares,
        dates,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

async fn retrieve_image<A: ImageryArchive>(
    archive: &A,
    request: &ImageRequest,
    settings: &RequestSettings,
) -> Result<RenderedImage> {
    let region = request.region(settings.safety_margin)?;
    info!(
        latitude = request.latitude(),
        longitude = request.longitude(),
        buffer_km = region.radius_km,
        "Retrieving satellite image"
    );

    match fetch_least_cloudy(archive, region, request.dates, settings.thumbnail_dimension).await? {
        Selection::Found(image) => Ok(image),
        Selection::NotFound => Err(Error::NoImagery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn settings() -> RequestSettings {
        RequestSettings::from_config(&ServiceConfig::default()).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> SatelliteQuery {
        let mut query = SatelliteQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "latitude" => query.latitude = value,
                "longitude" => query.longitude = value,
                "hectares" => query.hectares = value,
                "start_date" => query.start_date = value,
                "end_date" => query.end_date = value,
                _ => unreachable!(),
            }
        }
        query
    }

    #[test]
    fn test_defaults_applied() {
        let settings = settings();
        let request =
            parse_request(&query(&[("latitude", "45.5"), ("longitude", "-73.5")]), &settings)
                .unwrap();
        assert_eq!(request.hectares, 100.0);
        assert_eq!(request.dates, settings.default_dates);
        assert_eq!(request.latitude(), 45.5);
        assert_eq!(request.longitude(), -73.5);
    }

    #[test]
    fn test_explicit_default_hectares_matches_omitted() {
        let settings = settings();
        let omitted =
            parse_request(&query(&[("latitude", "1"), ("longitude", "2")]), &settings).unwrap();
        let explicit = parse_request(
            &query(&[("latitude", "1"), ("longitude", "2"), ("hectares", "100")]),
            &settings,
        )
        .unwrap();
        assert_eq!(omitted, explicit);
        assert_eq!(
            omitted.region(settings.safety_margin).unwrap(),
            explicit.region(settings.safety_margin).unwrap()
        );
    }

    #[test]
    fn test_missing_coordinates() {
        let settings = settings();
        let cases: [&[(&str, &str)]; 3] = [
            &[("latitude", "1")],
            &[("longitude", "1")],
            &[("latitude", ""), ("longitude", "1")],
        ];
        for pairs in cases {
            let err = parse_request(&query(pairs), &settings).unwrap_err();
            assert_eq!(err.to_string(), "Latitude and longitude are required parameters");
        }
    }

    #[test]
    fn test_non_numeric_parameters() {
        let settings = settings();
        let err = parse_request(&query(&[("latitude", "north"), ("longitude", "1")]), &settings)
            .unwrap_err();
        assert_eq!(err.to_string(), "Latitude, longitude, and hectares must be numeric values");

        let err = parse_request(
            &query(&[("latitude", "1"), ("longitude", "1"), ("hectares", "lots")]),
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_area_limits() {
        let settings = settings();
        for hectares in ["0", "-3", "NaN", "2000000"] {
            let result = parse_request(
                &query(&[("latitude", "1"), ("longitude", "1"), ("hectares", hectares)]),
                &settings,
            );
            assert!(matches!(result, Err(Error::Validation(_))), "hectares={}", hectares);
        }
    }

    #[test]
    fn test_partial_date_override() {
        let settings = settings();
        let request = parse_request(
            &query(&[("latitude", "1"), ("longitude", "1"), ("start_date", "2024-05-01")]),
            &settings,
        )
        .unwrap();
        assert_eq!(request.dates.start_str(), "2024-05-01");
        assert_eq!(request.dates.end_str(), "2025-03-20");
    }

    #[test]
    fn test_out_of_range_latitude() {
        let settings = settings();
        let result = parse_request(&query(&[("latitude", "91"), ("longitude", "1")]), &settings);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
