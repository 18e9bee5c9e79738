pub mod bike_station;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod location;
pub mod render;
pub mod scale;
pub mod station;
pub mod time_filter;
pub mod tools;
pub mod traffic;
pub mod trip;

pub use bike_station::{BikeStation, BikeStations};
pub use controller::{StationMarker, TrafficController, TrafficView};
pub use time_filter::TimeFilter;
pub use trip::{Trip, Trips};
