//! Area to buffer radius conversion

use std::f64::consts::PI;

use crate::{Error, Result};

/// Extra radius applied on top of the exact circle so the requested area fits
pub const DEFAULT_SAFETY_MARGIN: f64 = 1.1;

const KM2_PER_HECTARE: f64 = 0.01;

/// Converts an area in hectares into a circular buffer radius in kilometers.
///
/// The radius is that of a circle with the given area, scaled by
/// `safety_margin`. Non-positive or non-finite areas are rejected rather
/// than producing a zero radius.
pub fn hectares_to_buffer_km(hectares: f64, safety_margin: f64) -> Result<f64> {
    if !hectares.is_finite() || hectares <= 0.0 {
        return Err(Error::InvalidArea(hectares));
    }
    if !safety_margin.is_finite() || safety_margin <= 0.0 {
        return Err(Error::Validation(format!(
            "Safety margin must be a positive number, got {}",
            safety_margin
        )));
    }

    let area_km2 = hectares * KM2_PER_HECTARE;
    let radius_km = (area_km2 / PI).sqrt();
    Ok(radius_km * safety_margin)
}
