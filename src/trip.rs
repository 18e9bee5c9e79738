use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    error::DataLoadError,
    tools::{
        date::{minutes_since_midnight, naive_date_time_from_str},
        serde::{bool_from_simple_str, optional_key_from_str},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BikeType {
    Classic,
    Electric,
    Other,
}

impl From<String> for BikeType {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_ref() {
            "classic" | "classic_bike" => BikeType::Classic,
            "electric" | "electric_bike" => BikeType::Electric,
            _ => BikeType::Other,
        }
    }
}

impl fmt::Display for BikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BikeType::Classic => f.write_str("classic"),
            BikeType::Electric => f.write_str("electric"),
            BikeType::Other => f.write_str("other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "ride_id")]
    pub id: String,

    pub bike_type: BikeType,

    #[serde(deserialize_with = "naive_date_time_from_str")]
    pub started_at: NaiveDateTime,

    #[serde(deserialize_with = "naive_date_time_from_str")]
    pub ended_at: NaiveDateTime,

    #[serde(default, deserialize_with = "optional_key_from_str")]
    pub start_station_id: Option<String>,

    #[serde(default, deserialize_with = "optional_key_from_str")]
    pub end_station_id: Option<String>,

    #[serde(deserialize_with = "bool_from_simple_str")]
    pub is_member: bool,
}

impl Trip {
    pub fn start_minute(&self) -> u16 {
        minutes_since_midnight(&self.started_at)
    }

    pub fn end_minute(&self) -> u16 {
        minutes_since_midnight(&self.ended_at)
    }
}

/// The immutable trip store, loaded once per session
#[derive(Debug, Clone, Default)]
pub struct Trips {
    pub trips: Vec<Trip>,
    /// Rows dropped while parsing
    pub skipped: usize,
}

impl Trips {
    pub fn bluebikes_trips_url() -> String {
        "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv".to_string()
    }

    /// Reads a trip export with a header row. Rows that fail to parse are
    /// skipped and counted rather than failing the whole file.
    pub fn from_csv(data: &str) -> Result<Self, DataLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_bytes());

        // A missing header is a malformed file, not a malformed row
        reader.headers()?;

        let mut skipped = 0;
        let trips: Vec<Trip> = reader
            .deserialize::<Trip>()
            .filter_map(|result| match result {
                Ok(trip) => Some(trip),
                Err(e) => {
                    log::debug!("skipping malformed trip row: {e}");
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            log::warn!(
                "skipped {skipped} of {} trip rows",
                trips.len() + skipped
            );
        }

        Ok(Trips { trips, skipped })
    }

    pub fn from_trips(trips: Vec<Trip>) -> Self {
        Trips { trips, skipped: 0 }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
