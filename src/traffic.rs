use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{bike_station::BikeStation, trip::Trip};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTraffic {
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
}

impl StationTraffic {
    pub fn new(arrivals: usize, departures: usize) -> Self {
        StationTraffic {
            arrivals,
            departures,
            total_traffic: arrivals + departures,
        }
    }

    /// Share of traffic leaving the station. A station with no traffic has a ratio of 0.
    pub fn departure_ratio(&self) -> f64 {
        if self.total_traffic == 0 {
            0.0
        } else {
            self.departures as f64 / self.total_traffic as f64
        }
    }
}

/// Number of trips per station key, trips without a key are not counted
fn count_by_station<'a, I, F>(trips: I, key: F) -> HashMap<&'a str, usize>
where
    I: Iterator<Item = &'a Trip>,
    F: Fn(&'a Trip) -> Option<&'a str>,
{
    trips.filter_map(key).counts()
}

/// Computes arrivals, departures and total traffic for every station from the
/// given trips. Stations are matched by `short_name` and stations with no trips
/// get zero traffic. Neither input is modified; a fresh station list is returned
/// in the same order as `stations`.
pub fn compute_station_traffic<'a, I>(stations: &[BikeStation], trips: I) -> Vec<BikeStation>
where
    I: IntoIterator<Item = &'a Trip>,
    I::IntoIter: Clone,
{
    let trips = trips.into_iter();
    let departures = count_by_station(trips.clone(), |t| t.start_station_id.as_deref());
    let arrivals = count_by_station(trips, |t| t.end_station_id.as_deref());

    stations
        .iter()
        .map(|station| {
            let id = station.short_name.as_str();
            let mut station = station.clone();
            station.traffic = StationTraffic::new(
                arrivals.get(id).copied().unwrap_or(0),
                departures.get(id).copied().unwrap_or(0),
            );
            station
        })
        .collect()
}

pub fn max_total_traffic(stations: &[BikeStation]) -> usize {
    stations
        .iter()
        .map(|s| s.traffic.total_traffic)
        .max()
        .unwrap_or(0)
}
