use crate::{Error, Result};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude/latitude in degrees (WGS84)
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// Creates a coordinate, rejecting positions outside the WGS84 range
    pub fn try_from_lonlat(lon: f64, lat: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::Validation(format!(
                "Latitude must be between -90 and 90 degrees, got {}",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::Validation(format!(
                "Longitude must be between -180 and 180 degrees, got {}",
                lon
            )));
        }
        Ok(Self::from_lonlat(lon, lat))
    }

    pub fn lon(&self) -> f64 {
        self.x
    }

    pub fn lat(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lonlat_order() {
        let coord = Coordinate::from_lonlat(-79.3832, 43.6532);
        assert_eq!(coord.lon(), -79.3832);
        assert_eq!(coord.lat(), 43.6532);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::try_from_lonlat(180.0, 90.0).is_ok());
        assert!(Coordinate::try_from_lonlat(-180.0, -90.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(Coordinate::try_from_lonlat(0.0, 90.5), Err(Error::Validation(_))));
        assert!(matches!(Coordinate::try_from_lonlat(-181.0, 0.0), Err(Error::Validation(_))));
        assert!(Coordinate::try_from_lonlat(f64::NAN, 0.0).is_err());
    }
}
