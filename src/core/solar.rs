use crate::core::{SolarCalculator, SolarDirection, SolarOptions};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use solar_positioning::{spa, time::DeltaT, RefractionCorrection};

/// Sun position via the NREL SPA algorithm.
#[derive(Debug, Clone, Default)]
pub struct SpaCalculator {
    options: SolarOptions,
}

impl SpaCalculator {
    pub fn new(options: SolarOptions) -> Self {
        Self { options }
    }
}

impl SolarCalculator for SpaCalculator {
    fn solar_direction(
        &self,
        latitude: f64,
        longitude: f64,
        instant: DateTime<Utc>,
    ) -> Result<SolarDirection> {
        let delta_t = DeltaT::estimate_from_date_like(instant)?;
        let refraction = self
            .options
            .refraction
            .then(RefractionCorrection::standard);

        let position = spa::solar_position(
            instant,
            latitude,
            longitude,
            self.options.elevation_meters,
            delta_t,
            refraction,
        )?;

        Ok(SolarDirection {
            altitude: position.elevation_angle(),
            azimuth: position.azimuth(),
        })
    }
}
