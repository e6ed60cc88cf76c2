use crate::utils::error::{LocatorError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
///
/// Only constructible through [`Coordinates::new`], so every value in
/// circulation has latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocatorError::InvalidConfigValueError {
                field: "latitude".to_string(),
                value: latitude.to_string(),
                reason: "Value must be between -90 and 90".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocatorError::InvalidConfigValueError {
                field: "longitude".to_string(),
                value: longitude.to_string(),
                reason: "Value must be between -180 and 180".to_string(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses the `"<lat>,<lon>"` form used by IP geolocation services.
    ///
    /// Anything other than exactly two in-range numbers is a
    /// [`LocatorError::MalformedDataError`].
    pub fn parse_loc(loc: &str) -> Result<Self> {
        let mut parts = loc.split(',');
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
            _ => {
                return Err(LocatorError::malformed(
                    loc,
                    "expected exactly two comma-separated values",
                ))
            }
        };

        let latitude = lat
            .parse::<f64>()
            .map_err(|e| LocatorError::malformed(loc, format!("latitude '{}': {}", lat, e)))?;
        let longitude = lon
            .parse::<f64>()
            .map_err(|e| LocatorError::malformed(loc, format!("longitude '{}': {}", lon, e)))?;

        Self::new(latitude, longitude)
            .map_err(|e| LocatorError::malformed(loc, e.to_string()))
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub source: LocationSource,
    /// Why the defaults were used; `None` for live results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ResolvedLocation {
    pub fn live(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            source: LocationSource::Live,
            fallback_reason: None,
        }
    }

    pub fn fallback(defaults: Coordinates, reason: impl Into<String>) -> Self {
        Self {
            coordinates: defaults,
            source: LocationSource::Fallback,
            fallback_reason: Some(reason.into()),
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == LocationSource::Live
    }
}

/// Apparent sun direction in degrees. Azimuth is measured clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarDirection {
    pub altitude: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarReport {
    pub instant: DateTime<Utc>,
    pub location: ResolvedLocation,
    pub direction: SolarDirection,
}
