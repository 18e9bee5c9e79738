use std::fs;

use bikeflow::bike_station::BikeStations;
use bikeflow::station::Station;

fn read_mock_data(name: &str) -> String {
    fs::read_to_string(format!("mock/{}", name)).unwrap()
}

#[test]
fn read_stations_json() {
    let raw_station_data = read_mock_data("bluebikes-stations.json");
    let stations = BikeStations::from_raw_data(&raw_station_data).unwrap();
    assert_eq!(stations.len(), 4);
    assert_eq!(stations.skipped, 1);

    let central_square = stations.find_station_by_id("M32011");
    assert!(central_square.is_some());

    let central_square = central_square.unwrap();
    assert_eq!(central_square.name(), "Central Square at Mass Ave / Essex St");
    assert_eq!(central_square.location().latitude, 42.36507);
    assert_eq!(central_square.location().longitude, -71.1031);
    assert!(stations.find_station_by_id("X00000").is_none());

    let serialized = serde_json::to_string(&stations);
    assert!(serialized.is_ok());
    let restored = serde_json::from_str::<BikeStations>(&serialized.unwrap()).unwrap();
    assert_eq!(restored.stations, stations.stations);
}

#[test]
fn reject_non_feed_document() {
    assert!(BikeStations::from_raw_data(r#"{"stations": []}"#).is_err());
    assert!(BikeStations::from_raw_data("not json").is_err());
}
