use std::fs;

use bikeflow::{
    render::GeoJsonSurface,
    scale::RadiusRange,
    time_filter::{filter_trips_by_time, TimeFilter},
    traffic::{compute_station_traffic, StationTraffic},
    BikeStations, TrafficController, Trips,
};
use geojson::GeoJson;

fn read_mock_data(name: &str) -> String {
    fs::read_to_string(format!("mock/{}", name)).unwrap()
}

fn load_mock() -> (BikeStations, Trips) {
    let stations = BikeStations::from_raw_data(&read_mock_data("bluebikes-stations.json")).unwrap();
    let trips = Trips::from_csv(&read_mock_data("bluebikes-traffic.csv")).unwrap();
    (stations, trips)
}

#[test]
fn read_trips_csv() {
    let (_, trips) = load_mock();
    assert_eq!(trips.len(), 8);
    assert_eq!(trips.skipped, 1);

    let keyless = trips.trips.last().unwrap();
    assert!(keyless.start_station_id.is_none());
    assert!(!keyless.is_member);
}

#[test]
fn full_day_traffic() {
    let (stations, trips) = load_mock();
    let result = compute_station_traffic(&stations.stations, &trips.trips);

    let traffic = |id: &str| {
        result
            .iter()
            .find(|s| s.short_name == id)
            .map(|s| s.traffic)
            .unwrap()
    };

    assert_eq!(traffic("M32006"), StationTraffic::new(3, 3));
    assert_eq!(traffic("M32011"), StationTraffic::new(3, 2));
    assert_eq!(traffic("A32000"), StationTraffic::new(2, 2));
    assert_eq!(traffic("D32040"), StationTraffic::default());

    for station in &result {
        assert_eq!(
            station.traffic.total_traffic,
            station.traffic.arrivals + station.traffic.departures
        );
    }
}

#[test]
fn morning_window() {
    let (_, trips) = load_mock();
    let filtered = filter_trips_by_time(&trips.trips, TimeFilter::Minute(480), 60);
    assert_eq!(filtered.len(), 4);

    // Late night trip ends just after midnight, no wraparound from the other side
    let just_after_midnight = filter_trips_by_time(&trips.trips, TimeFilter::Minute(10), 60);
    assert_eq!(just_after_midnight.len(), 1);
    assert_eq!(just_after_midnight[0].id, "4F60718293A4B5C6");
}

#[test]
fn slider_session() {
    let (stations, trips) = load_mock();
    let surface = GeoJsonSurface::new(Vec::new());
    let mut controller = TrafficController::new(stations, trips, surface).unwrap();

    let full_day = controller.view().clone();
    assert_eq!(full_day.domain_max, 6);
    assert_eq!(full_day.marker("M32006").unwrap().radius, 25.0);

    let morning = controller.set_slider_value(480).unwrap();
    assert_eq!(morning.trip_count, 4);
    assert_eq!(morning.range, Some(RadiusRange::FILTERED));
    assert_eq!(morning.domain_max, 4);
    assert_eq!(morning.marker("M32006").unwrap().radius, 50.0);
    assert_eq!(morning.marker("D32040").unwrap().radius, 3.0);
    assert_eq!(morning.marker("A32000").unwrap().flow, 0.0);

    controller.reposition();
    controller.set_slider_value(-1).unwrap();
    assert_eq!(controller.view(), &full_day);
    assert_eq!(controller.surface().frames(), 4);
}

#[test]
fn rendered_frames_are_geojson() {
    let (stations, trips) = load_mock();
    let mut controller =
        TrafficController::new(stations, trips, GeoJsonSurface::new(Vec::new())).unwrap();
    controller.set_slider_value(1065).unwrap();
    controller.set_slider_value(9999).unwrap_err();

    let output = String::from_utf8(controller.into_surface().into_inner()).unwrap();
    let frames: Vec<GeoJson> = output
        .lines()
        .map(|line| line.parse::<GeoJson>().unwrap())
        .collect();
    assert_eq!(frames.len(), 2);

    match &frames[1] {
        GeoJson::FeatureCollection(collection) => {
            assert_eq!(collection.features.len(), 4);
            let members = collection.foreign_members.as_ref().unwrap();
            assert_eq!(members["timeFilter"], 1065);
            assert_eq!(members["label"], "5:45 PM");
            assert_eq!(members["tripCount"], 2);
        }
        _ => panic!("expected a feature collection"),
    }
}
