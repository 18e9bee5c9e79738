use std::collections::HashSet;

use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use serde::{Deserialize, Serialize};

use crate::{
    error::DataLoadError, location::Location, station::Station, tools::serde::f64_from_str,
    traffic::StationTraffic,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BikeStation {
    pub short_name: String,

    #[serde(default)]
    pub station_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "lat", deserialize_with = "f64_from_str")]
    pub latitude: f64,

    #[serde(rename = "lon", deserialize_with = "f64_from_str")]
    pub longitude: f64,

    #[serde(default)]
    pub capacity: Option<u32>,

    /// Derived counts for the current time filter, overwritten on every aggregation
    #[serde(default)]
    pub traffic: StationTraffic,
}

impl BikeStation {
    pub fn new(short_name: &str, location: &Location) -> Self {
        Self {
            short_name: short_name.to_string(),
            station_id: None,
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            capacity: None,
            traffic: StationTraffic::default(),
        }
    }

    pub fn tooltip(&self) -> String {
        format!(
            "{} trips ({} departures, {} arrivals)",
            self.traffic.total_traffic, self.traffic.departures, self.traffic.arrivals
        )
    }
}

impl Station for BikeStation {
    fn id(&self) -> &str {
        &self.short_name
    }

    fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude, self.name.clone())
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_feature(&self) -> Feature {
        self.clone().into()
    }
}

impl From<BikeStation> for Feature {
    fn from(station: BikeStation) -> Feature {
        let geometry = Geometry::new(Value::Point(station.location().lnglat()));

        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), JsonValue::from(station.id().to_string()));
        properties.insert("name".to_string(), JsonValue::from(station.name()));
        properties.insert(
            "arrivals".to_string(),
            JsonValue::from(station.traffic.arrivals),
        );
        properties.insert(
            "departures".to_string(),
            JsonValue::from(station.traffic.departures),
        );
        properties.insert(
            "totalTraffic".to_string(),
            JsonValue::from(station.traffic.total_traffic),
        );

        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(geojson::feature::Id::String(station.short_name)),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StationFeed {
    #[serde(default)]
    last_updated: Option<i64>,
    data: StationFeedData,
}

#[derive(Debug, Deserialize)]
struct StationFeedData {
    stations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BikeStations {
    pub last_updated: Option<i64>,
    pub stations: Vec<BikeStation>,
    /// Records dropped while parsing: unusable key or coordinate, or a repeated key
    pub skipped: usize,
}

impl BikeStations {
    pub fn bluebikes_stations_url() -> String {
        "https://dsc106.com/labs/lab07/data/bluebikes-stations.json".to_string()
    }

    /// Parses a GBFS style `{"data": {"stations": [...]}}` document. Individual
    /// station records that fail to parse are skipped.
    pub fn from_raw_data(raw_data: &str) -> Result<Self, DataLoadError> {
        let feed: StationFeed = serde_json::from_str(raw_data)?;
        let total = feed.data.stations.len();
        let mut seen = HashSet::new();

        let stations: Vec<BikeStation> = feed
            .data
            .stations
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<BikeStation>(raw) {
                Ok(station) if station.location().is_valid() && !station.short_name.is_empty() => {
                    if seen.insert(station.short_name.clone()) {
                        Some(station)
                    } else {
                        log::warn!("dropping duplicate station {}", station.short_name);
                        None
                    }
                }
                Ok(station) => {
                    log::debug!("skipping station {:?} with unusable key or location", station.short_name);
                    None
                }
                Err(e) => {
                    log::debug!("skipping malformed station record: {e}");
                    None
                }
            })
            .collect();

        let skipped = total - stations.len();
        if skipped > 0 {
            log::warn!("skipped {skipped} of {total} station records");
        }

        Ok(BikeStations {
            last_updated: feed.last_updated,
            stations,
            skipped,
        })
    }

    pub fn from_stations(stations: Vec<BikeStation>) -> Self {
        BikeStations {
            last_updated: None,
            stations,
            skipped: 0,
        }
    }

    pub fn find_station_by_id(&self, short_name: &str) -> Option<BikeStation> {
        self.stations
            .iter()
            .find(|s| s.short_name == short_name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn parse_station() {
        let raw_station = r#"
        {
            "station_id": "a3a36d9e-a135-11e9-9cda-0a87ae2ba916",
            "short_name": "M32006",
            "name": "MIT at Mass Ave / Amherst St",
            "lat": 42.3581,
            "lon": "-71.093198",
            "capacity": 27,
            "region_id": "8",
            "rental_methods": ["KEY", "CREDITCARD"]
        }
        "#;

        let station = serde_json::from_str::<BikeStation>(raw_station);
        assert!(station.is_ok());

        let station = station.unwrap();
        assert_eq!(station.id(), "M32006");
        assert_eq!(station.capacity, Some(27));
        assert_eq!(station.longitude, -71.093198);
        assert_eq!(station.traffic, StationTraffic::default());
    }

    #[test]
    pub fn skip_malformed_stations() {
        let raw_data = r#"
        {
            "last_updated": 1711929600,
            "data": {
                "stations": [
                    {"short_name": "A32000", "name": "Good", "lat": 42.36, "lon": -71.09},
                    {"short_name": "A32001", "name": "Bad lat", "lat": "north", "lon": -71.09},
                    {"name": "No key", "lat": 42.36, "lon": -71.09},
                    {"short_name": "A32002", "lat": 42.37, "lon": -71.10},
                    {"short_name": "A32000", "name": "Duplicate", "lat": 42.30, "lon": -71.00}
                ]
            }
        }
        "#;

        let stations = BikeStations::from_raw_data(raw_data).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations.skipped, 3);
        assert_eq!(stations.find_station_by_id("A32000").unwrap().name, "Good");
        assert_eq!(stations.last_updated, Some(1711929600));

        let unnamed = stations.find_station_by_id("A32002").unwrap();
        assert_eq!(unnamed.name, "");
        assert!(stations.find_station_by_id("A32001").is_none());
    }

    #[test]
    pub fn station_feature() {
        let mut station = BikeStation::new("A", &Location::new(42.0, -71.0, "Alpha".into()));
        station.traffic = StationTraffic::new(1, 2);

        let feature = station.as_feature();
        assert_eq!(
            feature.geometry.unwrap().value,
            Value::Point(vec![-71.0, 42.0])
        );
        let properties = feature.properties.unwrap();
        assert_eq!(properties["id"], JsonValue::from("A"));
        assert_eq!(properties["totalTraffic"], JsonValue::from(3));
        assert_eq!(station.tooltip(), "3 trips (2 departures, 1 arrivals)");
    }
}
