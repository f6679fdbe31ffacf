//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `ROUTE_BIND_ADDR` | `127.0.0.1:3000` |
//! | `ROUTE_DATA_PATH` | `data/network.json` |
//! | `ROUTE_RELOAD_SECS` | `300` (0 disables reloading) |
//! | `ROUTE_OSRM_URL` | `http://router.project-osrm.org` |
//! | `ROUTE_OSRM_PROFILE` | `driving` |
//! | `ROUTE_OSRM_TIMEOUT_SECS` | `5` |
//! | `ROUTE_DISTANCE_MODE` | `osrm` (or `offline`) |
//! | `ROUTE_CACHE_TTL_SECS` | `600` |
//! | `ROUTE_CACHE_CAPACITY` | `10000` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::distance::{DistanceCacheConfig, OsrmConfig};

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where distances come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Query the OSRM routing API
    Osrm,
    /// Straight-line estimates, no network access
    Offline,
}

impl FromStr for DistanceMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "osrm" => Ok(DistanceMode::Osrm),
            "offline" => Ok(DistanceMode::Offline),
            _ => Err(()),
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,

    /// `None` disables periodic reloading
    pub reload_interval: Option<Duration>,

    pub distance_mode: DistanceMode,
    pub osrm: OsrmConfig,
    pub cache: DistanceCacheConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse(&lookup, "ROUTE_BIND_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let data_path = lookup("ROUTE_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/network.json"));

        let reload_secs: u64 = parse(&lookup, "ROUTE_RELOAD_SECS")?.unwrap_or(300);
        let reload_interval = (reload_secs > 0).then(|| Duration::from_secs(reload_secs));

        let distance_mode = parse(&lookup, "ROUTE_DISTANCE_MODE")?.unwrap_or(DistanceMode::Osrm);

        let mut osrm = OsrmConfig::new();
        if let Some(url) = lookup("ROUTE_OSRM_URL") {
            osrm = osrm.with_base_url(url);
        }
        if let Some(profile) = lookup("ROUTE_OSRM_PROFILE") {
            osrm = osrm.with_profile(profile);
        }
        if let Some(secs) = parse(&lookup, "ROUTE_OSRM_TIMEOUT_SECS")? {
            osrm = osrm.with_timeout(secs);
        }

        let mut cache = DistanceCacheConfig::default();
        if let Some(secs) = parse(&lookup, "ROUTE_CACHE_TTL_SECS")? {
            cache.ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse(&lookup, "ROUTE_CACHE_CAPACITY")? {
            cache.max_capacity = capacity;
        }

        Ok(Self {
            bind_addr,
            data_path,
            reload_interval,
            distance_mode,
            osrm,
            cache,
        })
    }
}

/// Parse an optional variable; unset or blank is `None`.
fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    if value.trim().is_empty() {
        return Ok(None);
    }

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_path, PathBuf::from("data/network.json"));
        assert_eq!(config.reload_interval, Some(Duration::from_secs(300)));
        assert_eq!(config.distance_mode, DistanceMode::Osrm);
        assert_eq!(config.osrm.base_url, "http://router.project-osrm.org");
        assert_eq!(config.osrm.profile, "driving");
        assert_eq!(config.osrm.timeout_secs, 5);
        assert_eq!(config.cache.ttl, Duration::from_secs(600));
        assert_eq!(config.cache.max_capacity, 10_000);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("ROUTE_BIND_ADDR", "0.0.0.0:8080"),
            ("ROUTE_RELOAD_SECS", "0"),
            ("ROUTE_DISTANCE_MODE", "Offline"),
            ("ROUTE_OSRM_URL", "http://localhost:5000"),
            ("ROUTE_OSRM_TIMEOUT_SECS", "2"),
            ("ROUTE_CACHE_CAPACITY", "50"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.reload_interval, None);
        assert_eq!(config.distance_mode, DistanceMode::Offline);
        assert_eq!(config.osrm.base_url, "http://localhost:5000");
        assert_eq!(config.osrm.timeout_secs, 2);
        assert_eq!(config.cache.max_capacity, 50);
    }

    #[test]
    fn blank_value_uses_default() {
        let config = config(&[("ROUTE_RELOAD_SECS", "  ")]).unwrap();
        assert_eq!(config.reload_interval, Some(Duration::from_secs(300)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config(&[("ROUTE_OSRM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for ROUTE_OSRM_TIMEOUT_SECS: \"soon\""
        );

        assert!(config(&[("ROUTE_DISTANCE_MODE", "carrier-pigeon")]).is_err());
        assert!(config(&[("ROUTE_BIND_ADDR", "localhost")]).is_err());
    }
}
