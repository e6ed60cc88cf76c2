pub mod geo;
pub mod http;
pub mod ip;
pub mod location;
pub mod locator;
pub mod solar;

pub use crate::domain::model::{
    Coordinates, LocationSource, ResolvedLocation, SolarDirection, SolarReport,
};
pub use crate::domain::ports::{
    ConfigProvider, Geolocator, IpResolver, LocationProvider, SolarCalculator, SolarOptions,
};
pub use crate::utils::error::Result;
