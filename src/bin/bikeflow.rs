//! Station traffic driver
//!
//! Loads the station and trip feeds once, then reads input events from stdin
//! and writes one GeoJSON `FeatureCollection` per rendered view to stdout.
//!
//! ## Usage
//!
//! ```bash
//! printf '480\n1020\nzoom\n-1\n' | cargo run --release --bin bikeflow
//! ```
//!
//! ## Events
//!
//! - an integer in -1..=1439 sets the time-of-day slider (-1 clears the filter)
//! - `move`, `zoom`, `resize`, `moveend` redraw the last view at new positions
//! - `quit` exits
//!
//! ## Environment Variables
//!
//! - BIKEFLOW_STATIONS_URL - Station feed URL or path (default: Bluebikes GBFS snapshot)
//! - BIKEFLOW_TRIPS_URL - Trip CSV URL or path (default: Bluebikes March 2024 trips)
//! - BIKEFLOW_WINDOW_MINUTES - Half-width of the time window (default: 60)
//! - RUST_LOG - Logging level (optional, default: info)

use std::io::{self, BufRead};

use bikeflow::{
    config::Config, error::ControllerError, loader::load_all, render::GeoJsonSurface,
    TrafficController,
};

enum InputEvent {
    Slider(i32),
    Viewport,
    Quit,
}

fn parse_event(line: &str) -> Option<InputEvent> {
    match line.trim() {
        "" => None,
        "move" | "zoom" | "resize" | "moveend" => Some(InputEvent::Viewport),
        "quit" | "exit" => Some(InputEvent::Quit),
        other => other.parse::<i32>().ok().map(InputEvent::Slider),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    env_logger::Builder::new()
        .parse_filters(config.log_filter())
        .target(env_logger::Target::Stderr)
        .init();

    log::info!(
        "stations: {}, trips: {}, window: ±{} minutes",
        config.stations_source,
        config.trips_source,
        config.window_minutes
    );

    let client = reqwest::Client::new();
    let (stations, trips) = load_all(&client, &config).await;

    // Without both feeds the map would only show empty stations
    let stations = stations.map_err(|_| ControllerError::NotLoaded("station data"))?;
    let trips = trips.map_err(|_| ControllerError::NotLoaded("trip data"))?;

    let surface = GeoJsonSurface::new(io::stdout());
    let mut controller =
        TrafficController::with_window(stations, trips, config.window_minutes, surface)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match parse_event(&line) {
            Some(InputEvent::Slider(value)) => {
                if let Err(e) = controller.set_slider_value(value) {
                    log::warn!("{e}");
                }
            }
            Some(InputEvent::Viewport) => controller.reposition(),
            Some(InputEvent::Quit) => break,
            None if line.trim().is_empty() => {}
            None => log::warn!("ignoring unrecognized input: {line:?}"),
        }
    }

    log::info!("rendered {} frames", controller.surface().frames());
    Ok(())
}
