//! Geographic primitives: WGS84 points and circular search regions

pub mod buffer;
pub mod coordinate;

pub use buffer::{hectares_to_buffer_km, DEFAULT_SAFETY_MARGIN};
pub use coordinate::Coordinate;

/// Circular region of interest around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
    pub center: Coordinate,
    /// Buffer radius in kilometers, always positive
    pub radius_km: f64,
}

impl SearchRegion {
    /// Derives the region covering `hectares` (plus margin) around `center`
    pub fn around(center: Coordinate, hectares: f64, safety_margin: f64) -> crate::Result<Self> {
        let radius_km = hectares_to_buffer_km(hectares, safety_margin)?;
        Ok(Self { center, radius_km })
    }

    /// Buffer radius in meters, the unit the imagery platform expects
    pub fn radius_m(&self) -> f64 {
        self.radius_km * 1000.0
    }
}
