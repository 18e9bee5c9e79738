use std::env;

use crate::{bike_station::BikeStations, time_filter::DEFAULT_WINDOW_MINUTES, trip::Trips};

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stations_source: String,
    pub trips_source: String,
    pub window_minutes: u16,
    pub rust_log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stations_source: BikeStations::bluebikes_stations_url(),
            trips_source: Trips::bluebikes_trips_url(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
            rust_log: None,
        }
    }
}

impl Config {
    /// Log filter for env_logger, `info` unless `RUST_LOG` is set
    pub fn log_filter(&self) -> &str {
        self.rust_log
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("info")
    }

    /// Load configuration from environment variables
    ///
    /// Sources may be URLs or local file paths. Unset or unparseable values
    /// fall back to the Bluebikes March 2024 feeds and a 60 minute window.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let stations_source = lookup("BIKEFLOW_STATIONS_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.stations_source);

        let trips_source = lookup("BIKEFLOW_TRIPS_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.trips_source);

        let window_minutes = match lookup("BIKEFLOW_WINDOW_MINUTES") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!("ignoring invalid BIKEFLOW_WINDOW_MINUTES={raw}");
                defaults.window_minutes
            }),
            None => defaults.window_minutes,
        };

        Self {
            stations_source,
            trips_source,
            window_minutes,
            rust_log: lookup("RUST_LOG"),
        }
    }
}
