use crate::core::geo::{HttpGeolocator, IP_PLACEHOLDER};
use crate::core::http::build_client;
use crate::core::ip::HttpIpResolver;
use crate::core::{ConfigProvider, Coordinates, Geolocator, IpResolver, LocationProvider, ResolvedLocation};
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation;
use async_trait::async_trait;

/// Chains the IP lookup and the geolocation lookup, answering with the
/// configured defaults whenever either one is unavailable.
///
/// Only a `loc` value that is present but unparseable escapes as an error;
/// the two coordinates are never mixed between live and default values.
pub struct LocationResolver<I: IpResolver, G: Geolocator> {
    ip_resolver: I,
    geolocator: G,
    defaults: Coordinates,
}

pub type HttpLocationResolver = LocationResolver<HttpIpResolver, HttpGeolocator>;

impl<I: IpResolver, G: Geolocator> LocationResolver<I, G> {
    pub fn new(ip_resolver: I, geolocator: G, defaults: Coordinates) -> Self {
        Self {
            ip_resolver,
            geolocator,
            defaults,
        }
    }

    fn fall_back(&self, stage: &str, error: LocatorError) -> ResolvedLocation {
        tracing::warn!(
            "⚠️ {} unavailable, using default location {}: {}",
            stage,
            self.defaults,
            error
        );
        ResolvedLocation::fallback(self.defaults, format!("{}: {}", stage, error))
    }
}

impl HttpLocationResolver {
    /// Rejects providers whose endpoints or timeout could never yield a live result.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validation::validate_url("endpoints.ip", config.ip_endpoint())?;
        validation::validate_url_template(
            "endpoints.geolocation",
            config.geolocation_endpoint(),
            IP_PLACEHOLDER,
        )?;
        if config.request_timeout().is_zero() {
            return Err(LocatorError::InvalidConfigValueError {
                field: "http.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }

        let client = build_client(config)?;
        Ok(Self::new(
            HttpIpResolver::new(client.clone(), config.ip_endpoint()),
            HttpGeolocator::new(client, config.geolocation_endpoint()),
            config.default_coordinates()?,
        ))
    }
}

#[async_trait]
impl<I: IpResolver, G: Geolocator> LocationProvider for LocationResolver<I, G> {
    async fn resolve_location(&self) -> Result<ResolvedLocation> {
        let ip = match self.ip_resolver.resolve_public_ip().await {
            Ok(ip) => ip,
            Err(e) => return Ok(self.fall_back("IP lookup", e)),
        };

        let loc = match self.geolocator.locate(&ip).await {
            Ok(loc) => loc,
            Err(e) if e.is_recoverable() => return Ok(self.fall_back("Geolocation", e)),
            Err(e) => return Err(e),
        };

        let coordinates = Coordinates::parse_loc(&loc)?;
        tracing::info!("📍 Location resolved from {}: {}", ip, coordinates);

        Ok(ResolvedLocation::live(coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LocationSource, SolarOptions};
    use std::time::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum IpBehavior {
        Address(&'static str),
        Fail,
    }

    struct StubIpResolver(IpBehavior);

    #[async_trait]
    impl IpResolver for StubIpResolver {
        async fn resolve_public_ip(&self) -> Result<String> {
            match self.0 {
                IpBehavior::Address(ip) => Ok(ip.to_string()),
                IpBehavior::Fail => Err(LocatorError::network("http://ip.test", "connection refused")),
            }
        }
    }

    enum GeoBehavior {
        Loc(&'static str),
        Network,
        MissingLoc,
    }

    struct StubGeolocator {
        behavior: GeoBehavior,
        calls: AtomicUsize,
        last_ip: Mutex<Option<String>>,
    }

    impl StubGeolocator {
        fn new(behavior: GeoBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
                last_ip: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Geolocator for StubGeolocator {
        async fn locate(&self, ip: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_ip.lock().unwrap() = Some(ip.to_string());
            match self.behavior {
                GeoBehavior::Loc(loc) => Ok(loc.to_string()),
                GeoBehavior::Network => Err(LocatorError::network("http://geo.test", "status 500")),
                GeoBehavior::MissingLoc => Err(LocatorError::missing_field("http://geo.test", "loc")),
            }
        }
    }

    fn defaults() -> Coordinates {
        Coordinates::new(33.8042367, -116.9791774).unwrap()
    }

    struct StaticConfig {
        ip_endpoint: &'static str,
        geolocation_endpoint: &'static str,
        timeout: Duration,
    }

    impl StaticConfig {
        fn valid() -> Self {
            Self {
                ip_endpoint: "https://ip.example.com/json",
                geolocation_endpoint: "https://geo.example.com/{ip}/json",
                timeout: Duration::from_secs(5),
            }
        }
    }

    impl ConfigProvider for StaticConfig {
        fn default_coordinates(&self) -> Result<Coordinates> {
            Ok(defaults())
        }

        fn ip_endpoint(&self) -> &str {
            self.ip_endpoint
        }

        fn geolocation_endpoint(&self) -> &str {
            self.geolocation_endpoint
        }

        fn request_timeout(&self) -> Duration {
            self.timeout
        }

        fn user_agent(&self) -> &str {
            "sun-locator-test"
        }

        fn solar_options(&self) -> SolarOptions {
            SolarOptions::default()
        }
    }

    #[test]
    fn test_from_config_rejects_unusable_settings() {
        assert!(HttpLocationResolver::from_config(&StaticConfig::valid()).is_ok());

        let zero_timeout = StaticConfig {
            timeout: Duration::ZERO,
            ..StaticConfig::valid()
        };
        assert!(matches!(
            HttpLocationResolver::from_config(&zero_timeout),
            Err(LocatorError::InvalidConfigValueError { ref field, .. }) if field == "http.timeout_seconds"
        ));

        let no_placeholder = StaticConfig {
            geolocation_endpoint: "https://geo.example.com/json",
            ..StaticConfig::valid()
        };
        assert!(matches!(
            HttpLocationResolver::from_config(&no_placeholder),
            Err(LocatorError::InvalidConfigValueError { ref field, .. }) if field == "endpoints.geolocation"
        ));

        let bad_scheme = StaticConfig {
            ip_endpoint: "ftp://ip.example.com",
            ..StaticConfig::valid()
        };
        assert!(matches!(
            HttpLocationResolver::from_config(&bad_scheme),
            Err(LocatorError::InvalidConfigValueError { ref field, .. }) if field == "endpoints.ip"
        ));
    }

    #[tokio::test]
    async fn test_ip_failure_falls_back_without_geolocation() {
        let resolver = LocationResolver::new(
            StubIpResolver(IpBehavior::Fail),
            StubGeolocator::new(GeoBehavior::Loc("34.05,-118.25")),
            defaults(),
        );

        let resolved = resolver.resolve_location().await.unwrap();

        assert_eq!(resolved.coordinates, defaults());
        assert_eq!(resolved.source, LocationSource::Fallback);
        assert!(resolved.fallback_reason.unwrap().starts_with("IP lookup"));
        assert_eq!(resolver.geolocator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geolocation_failures_fall_back() {
        for behavior in [GeoBehavior::Network, GeoBehavior::MissingLoc] {
            let resolver = LocationResolver::new(
                StubIpResolver(IpBehavior::Address("203.0.113.5")),
                StubGeolocator::new(behavior),
                defaults(),
            );

            let resolved = resolver.resolve_location().await.unwrap();

            assert_eq!(resolved.coordinates, defaults());
            assert_eq!(resolved.source, LocationSource::Fallback);
        }
    }

    #[tokio::test]
    async fn test_live_location() {
        let resolver = LocationResolver::new(
            StubIpResolver(IpBehavior::Address("203.0.113.5")),
            StubGeolocator::new(GeoBehavior::Loc("34.05,-118.25")),
            defaults(),
        );

        let resolved = resolver.resolve_location().await.unwrap();

        assert_eq!(resolved, ResolvedLocation::live(Coordinates::new(34.05, -118.25).unwrap()));
        assert_eq!(
            resolver.geolocator.last_ip.lock().unwrap().as_deref(),
            Some("203.0.113.5")
        );
    }

    #[tokio::test]
    async fn test_malformed_loc_propagates() {
        let resolver = LocationResolver::new(
            StubIpResolver(IpBehavior::Address("203.0.113.5")),
            StubGeolocator::new(GeoBehavior::Loc("abc,-118.25")),
            defaults(),
        );

        let err = resolver.resolve_location().await.unwrap_err();
        assert!(matches!(err, LocatorError::MalformedDataError { .. }));
    }
}
