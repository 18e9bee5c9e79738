use thiserror::Error;

/// Failure to load one of the two data sources. Each source fails on its own.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to fetch {source_name}: {error}")]
    Request {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: &'static str,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to parse station data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse trip data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{source_name} contained no usable records")]
    Empty { source_name: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFilterError {
    #[error("time filter {0} is outside -1..=1439")]
    OutOfRange(i32),
}

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("{0} did not load, station traffic is unavailable")]
    NotLoaded(&'static str),
    #[error(transparent)]
    TimeFilter(#[from] TimeFilterError),
}
