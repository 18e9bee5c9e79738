use reqwest::Client;

use crate::{bike_station::BikeStations, config::Config, error::DataLoadError, trip::Trips};

const STATIONS: &str = "station data";
const TRIPS: &str = "trip data";

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_text(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Reads a data source, fetching over HTTP for URLs and from disk otherwise
pub async fn read_source(
    client: &Client,
    source: &str,
    source_name: &'static str,
) -> Result<String, DataLoadError> {
    if is_remote(source) {
        fetch_text(client, source)
            .await
            .map_err(|error| DataLoadError::Request { source_name, error })
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|error| DataLoadError::Io { source_name, error })
    }
}

pub async fn load_stations(client: &Client, source: &str) -> Result<BikeStations, DataLoadError> {
    let raw_data = read_source(client, source, STATIONS).await?;
    let stations = BikeStations::from_raw_data(&raw_data)?;
    if stations.is_empty() {
        return Err(DataLoadError::Empty {
            source_name: STATIONS,
        });
    }

    log::info!("loaded {} stations from {source}", stations.len());
    Ok(stations)
}

pub async fn load_trips(client: &Client, source: &str) -> Result<Trips, DataLoadError> {
    let raw_data = read_source(client, source, TRIPS).await?;
    let trips = Trips::from_csv(&raw_data)?;
    if trips.is_empty() {
        return Err(DataLoadError::Empty { source_name: TRIPS });
    }

    log::info!("loaded {} trips from {source}", trips.len());
    Ok(trips)
}

/// Loads both sources concurrently. Each result is reported on its own and
/// neither failure is retried.
pub async fn load_all(
    client: &Client,
    config: &Config,
) -> (
    Result<BikeStations, DataLoadError>,
    Result<Trips, DataLoadError>,
) {
    let (stations, trips) = tokio::join!(
        load_stations(client, &config.stations_source),
        load_trips(client, &config.trips_source),
    );

    if let Err(e) = &stations {
        log::error!("error loading stations: {e}");
    }
    if let Err(e) = &trips {
        log::error!("error loading trips: {e}");
    }

    (stations, trips)
}
