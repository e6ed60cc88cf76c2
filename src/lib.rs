pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use self::core::{
    location::{HttpLocationResolver, LocationResolver},
    locator::Locator,
    solar::SpaCalculator,
    Coordinates, LocationSource, ResolvedLocation, SolarDirection, SolarReport,
};
pub use utils::error::{LocatorError, Result};
