use crate::core::geo::{DEFAULT_GEOLOCATION_ENDPOINT, IP_PLACEHOLDER};
use crate::core::ip::DEFAULT_IP_ENDPOINT;
use crate::core::{ConfigProvider, Coordinates, SolarOptions};
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LATITUDE: f64 = 33.8042367;
pub const DEFAULT_LONGITUDE: f64 = -116.9791774;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("sun-locator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub location: LocationConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub solar: SolarConfig,
}

/// Coordinates used whenever live resolution is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub ip: Option<String>,
    /// Template containing `{ip}`.
    pub geolocation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolarConfig {
    pub elevation_meters: Option<f64>,
    pub refraction: Option<bool>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            location: LocationConfig {
                default_latitude: DEFAULT_LATITUDE,
                default_longitude: DEFAULT_LONGITUDE,
            },
            endpoints: EndpointsConfig::default(),
            http: HttpConfig::default(),
            solar: SolarConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LocatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text, after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "location.default_latitude",
            self.location.default_latitude,
            -90.0,
            90.0,
        )?;
        validation::validate_range(
            "location.default_longitude",
            self.location.default_longitude,
            -180.0,
            180.0,
        )?;

        validation::validate_url("endpoints.ip", self.ip_endpoint())?;
        validation::validate_url_template(
            "endpoints.geolocation",
            self.geolocation_endpoint(),
            IP_PLACEHOLDER,
        )?;

        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        if let Some(user_agent) = &self.http.user_agent {
            validation::validate_non_empty_string("http.user_agent", user_agent)?;
        }
        if let Some(elevation) = self.solar.elevation_meters {
            if !elevation.is_finite() {
                return Err(LocatorError::InvalidConfigValueError {
                    field: "solar.elevation_meters".to_string(),
                    value: elevation.to_string(),
                    reason: "Value must be a finite number".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn default_coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.location.default_latitude, self.location.default_longitude)
    }

    fn ip_endpoint(&self) -> &str {
        self.endpoints.ip.as_deref().unwrap_or(DEFAULT_IP_ENDPOINT)
    }

    fn geolocation_endpoint(&self) -> &str {
        self.endpoints
            .geolocation
            .as_deref()
            .unwrap_or(DEFAULT_GEOLOCATION_ENDPOINT)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn solar_options(&self) -> SolarOptions {
        let defaults = SolarOptions::default();
        SolarOptions {
            elevation_meters: self
                .solar
                .elevation_meters
                .unwrap_or(defaults.elevation_meters),
            refraction: self.solar.refraction.unwrap_or(defaults.refraction),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
