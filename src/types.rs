//! Request-scoped data types

use chrono::NaiveDate;

use crate::geo::{Coordinate, SearchRegion};
use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Acquisition window, both ends given as calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `end` is exclusive and must come after `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(Error::Validation(format!(
                "end_date {1} must be after start_date {0}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date("start_date", start)?, parse_date("end_date", end)?)
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        Error::Validation(format!("{} must be a date in YYYY-MM-DD format, got '{}'", field, value))
    })
}

/// A validated image request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRequest {
    pub location: Coordinate,
    /// Requested area in hectares, always positive
    pub hectares: f64,
    pub dates: DateRange,
}

impl ImageRequest {
    pub fn latitude(&self) -> f64 {
        self.location.lat()
    }

    pub fn longitude(&self) -> f64 {
        self.location.lon()
    }

    /// Search region for this request
    pub fn region(&self, safety_margin: f64) -> Result<SearchRegion> {
        SearchRegion::around(self.location, self.hectares, safety_margin)
    }

    /// Attachment name, e.g. `satellite_45.5_-73.5_100.0ha.png`
    pub fn filename(&self) -> String {
        format!(
            "satellite_{}_{}_{}ha.png",
            format_number(self.latitude()),
            format_number(self.longitude()),
            format_number(self.hectares)
        )
    }
}

/// Formats a float the way filenames have always carried it: one decimal on
/// integral values (`100` -> `100.0`) and a signed two-digit exponent outside
/// `1e-4..1e16` (`0.00001` -> `1e-05`)
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() || value == 0.0 || (1e-4..1e16).contains(&magnitude) {
        if value.is_finite() && value.fract() == 0.0 {
            format!("{:.1}", value)
        } else {
            value.to_string()
        }
    } else {
        scientific(value)
    }
}

fn scientific(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exponent))) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        _ => value.to_string(),
    }
}
