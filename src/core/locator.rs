use crate::core::location::HttpLocationResolver;
use crate::core::solar::SpaCalculator;
use crate::core::{ConfigProvider, LocationProvider, SolarCalculator, SolarDirection, SolarReport};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Runs location resolution and then the solar calculation, in that order.
pub struct Locator<L: LocationProvider, S: SolarCalculator> {
    location: L,
    calculator: S,
}

impl<L: LocationProvider, S: SolarCalculator> Locator<L, S> {
    pub fn new(location: L, calculator: S) -> Self {
        Self {
            location,
            calculator,
        }
    }

    pub fn calculator(&self) -> &S {
        &self.calculator
    }

    /// Sun direction at the resolved location. `instant` defaults to now.
    pub async fn get_solar_direction(
        &self,
        instant: Option<DateTime<Utc>>,
    ) -> Result<SolarDirection> {
        Ok(self.report(instant).await?.direction)
    }

    /// Same as [`Locator::get_solar_direction`], but keeps the instant and
    /// where the coordinates came from.
    pub async fn report(&self, instant: Option<DateTime<Utc>>) -> Result<SolarReport> {
        let instant = instant.unwrap_or_else(Utc::now);
        let location = self.location.resolve_location().await?;

        let coordinates = location.coordinates;
        tracing::debug!(
            "☀️ Computing sun position at {} for {} ({:?})",
            instant,
            coordinates,
            location.source
        );
        let direction = self.calculator.solar_direction(
            coordinates.latitude(),
            coordinates.longitude(),
            instant,
        )?;

        Ok(SolarReport {
            instant,
            location,
            direction,
        })
    }
}

impl Locator<HttpLocationResolver, SpaCalculator> {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self::new(
            HttpLocationResolver::from_config(config)?,
            SpaCalculator::new(config.solar_options()),
        ))
    }
}
