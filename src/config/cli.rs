use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sun-locator")]
#[command(about = "Locate this machine from its public IP and report where the sun is")]
#[command(allow_negative_numbers = true)]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Instant to compute for (RFC 3339), defaults to now")]
    pub at: Option<DateTime<Utc>>,

    #[arg(long, help = "Fallback latitude in degrees")]
    pub latitude: Option<f64>,

    #[arg(long, help = "Fallback longitude in degrees")]
    pub longitude: Option<f64>,

    #[arg(long, help = "Public IP service URL")]
    pub ip_endpoint: Option<String>,

    #[arg(long, help = "Geolocation URL template containing {ip}")]
    pub geo_endpoint: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Observer elevation in metres")]
    pub elevation: Option<f64>,

    #[arg(long, help = "Disable atmospheric refraction correction")]
    pub no_refraction: bool,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the file named by `--config` (or the built-in defaults) and
    /// lays the explicit flags over it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(latitude) = self.latitude {
            config.location.default_latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            config.location.default_longitude = longitude;
        }
        if let Some(endpoint) = &self.ip_endpoint {
            config.endpoints.ip = Some(endpoint.clone());
        }
        if let Some(endpoint) = &self.geo_endpoint {
            config.endpoints.geolocation = Some(endpoint.clone());
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = Some(timeout);
        }
        if let Some(elevation) = self.elevation {
            config.solar.elevation_meters = Some(elevation);
        }
        if self.no_refraction {
            config.solar.refraction = Some(false);
        }

        config.validate()?;
        Ok(config)
    }
}
