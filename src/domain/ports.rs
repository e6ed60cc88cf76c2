use crate::domain::model::{Coordinates, ResolvedLocation, SolarDirection};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Observer parameters handed to the solar calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarOptions {
    pub elevation_meters: f64,
    pub refraction: bool,
}

impl Default for SolarOptions {
    fn default() -> Self {
        Self {
            elevation_meters: 0.0,
            refraction: true,
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn default_coordinates(&self) -> Result<Coordinates>;
    fn ip_endpoint(&self) -> &str;
    fn geolocation_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn solar_options(&self) -> SolarOptions;
}

#[async_trait]
pub trait IpResolver: Send + Sync {
    async fn resolve_public_ip(&self) -> Result<String>;
}

/// Maps an IP address to the raw `"lat,lon"` string reported by the service.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self, ip: &str) -> Result<String>;
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn resolve_location(&self) -> Result<ResolvedLocation>;
}

pub trait SolarCalculator: Send + Sync {
    fn solar_direction(
        &self,
        latitude: f64,
        longitude: f64,
        instant: DateTime<Utc>,
    ) -> Result<SolarDirection>;
}
