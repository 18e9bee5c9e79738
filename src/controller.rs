use std::collections::HashMap;

use geojson::{Feature, JsonValue};
use serde::Serialize;

use crate::{
    bike_station::{BikeStation, BikeStations},
    error::ControllerError,
    render::RenderSurface,
    scale::{QuantizeScale, RadiusRange, SqrtScale},
    station::Station,
    time_filter::{filter_trips_by_time, TimeFilter, DEFAULT_WINDOW_MINUTES},
    traffic::{compute_station_traffic, max_total_traffic},
    trip::{Trip, Trips},
};

/// One drawable station: its current traffic plus the visual encodings derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub station: BikeStation,
    pub radius: f64,
    pub flow: f64,
}

impl StationMarker {
    pub fn new(station: BikeStation, radius: &SqrtScale, flow: &QuantizeScale) -> Self {
        StationMarker {
            radius: radius.scale(station.traffic.total_traffic as f64),
            flow: flow.scale(station.traffic.departure_ratio()),
            station,
        }
    }

    pub fn id(&self) -> &str {
        self.station.id()
    }
}

impl From<&StationMarker> for Feature {
    fn from(marker: &StationMarker) -> Feature {
        let mut feature = marker.station.as_feature();
        if let Some(properties) = feature.properties.as_mut() {
            properties.insert("radius".to_string(), JsonValue::from(marker.radius));
            properties.insert("flow".to_string(), JsonValue::from(marker.flow));
            properties.insert(
                "tooltip".to_string(),
                JsonValue::from(marker.station.tooltip()),
            );
        }
        feature
    }
}

/// The last computed station traffic for the current filter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficView {
    pub filter: TimeFilter,
    pub trip_count: usize,
    pub domain_max: usize,
    pub range: Option<RadiusRange>,
    pub markers: Vec<StationMarker>,
}

impl TrafficView {
    pub fn marker(&self, short_name: &str) -> Option<&StationMarker> {
        self.markers.iter().find(|m| m.id() == short_name)
    }

    /// Markers keyed by station id, for matching visual elements across updates
    pub fn by_id(&self) -> HashMap<&str, &StationMarker> {
        self.markers.iter().map(|m| (m.id(), m)).collect()
    }

    pub fn features(&self) -> Vec<Feature> {
        self.markers.iter().map(Feature::from).collect()
    }
}

/// Owns the loaded stations and trips together with the current time filter.
/// Every filter change recomputes traffic from the loaded station list and
/// pushes the result to the render surface before returning.
pub struct TrafficController<S: RenderSurface> {
    stations: Vec<BikeStation>,
    trips: Vec<Trip>,
    window: u16,
    filter: TimeFilter,
    view: TrafficView,
    surface: S,
}

impl<S: RenderSurface> TrafficController<S> {
    pub fn new(stations: BikeStations, trips: Trips, surface: S) -> Result<Self, ControllerError> {
        Self::with_window(stations, trips, DEFAULT_WINDOW_MINUTES, surface)
    }

    pub fn with_window(
        stations: BikeStations,
        trips: Trips,
        window: u16,
        surface: S,
    ) -> Result<Self, ControllerError> {
        if stations.is_empty() {
            return Err(ControllerError::NotLoaded("station data"));
        }
        if trips.is_empty() {
            return Err(ControllerError::NotLoaded("trip data"));
        }

        let mut controller = TrafficController {
            stations: stations.stations,
            trips: trips.trips,
            window,
            filter: TimeFilter::Any,
            view: TrafficView::default(),
            surface,
        };
        controller.update();
        Ok(controller)
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn view(&self) -> &TrafficView {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Handles a slider input event. `-1` clears the filter.
    pub fn set_slider_value(&mut self, value: i32) -> Result<&TrafficView, ControllerError> {
        let filter = TimeFilter::from_slider(value)?;
        self.set_time_filter(filter)
    }

    /// Rejects minutes outside the day and leaves the current view untouched
    pub fn set_time_filter(&mut self, filter: TimeFilter) -> Result<&TrafficView, ControllerError> {
        self.filter = filter.validate()?;
        self.update();
        Ok(&self.view)
    }

    /// Handles map move, zoom and resize events. Traffic is not recomputed, the
    /// surface only re-reads station positions.
    pub fn reposition(&mut self) {
        self.surface.update_positions(&self.view);
    }

    fn update(&mut self) {
        self.view = self.recompute();
        self.surface.show_time(&self.filter);
        self.surface.render(&self.view);
    }

    fn recompute(&self) -> TrafficView {
        let filtered = filter_trips_by_time(&self.trips, self.filter, self.window);
        let stations = compute_station_traffic(&self.stations, filtered.iter().copied());

        let domain_max = max_total_traffic(&stations);
        let range = RadiusRange::for_filter(&self.filter);
        let radius = SqrtScale::new(domain_max as f64, range);
        let flow = QuantizeScale::flow();

        log::debug!(
            "recomputed traffic for {}: {} trips, max station traffic {}",
            self.filter,
            filtered.len(),
            domain_max
        );

        TrafficView {
            filter: self.filter,
            trip_count: filtered.len(),
            domain_max,
            range: Some(range),
            markers: stations
                .into_iter()
                .map(|station| StationMarker::new(station, &radius, &flow))
                .collect(),
        }
    }
}
