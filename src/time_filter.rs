use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::TimeFilterError, trip::Trip};

pub const MINUTES_PER_DAY: u16 = 1440;
pub const DEFAULT_WINDOW_MINUTES: u16 = 60;

/// Slider value standing for "no filter"
pub const ANY_TIME: i32 = -1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFilter {
    #[default]
    Any,
    Minute(u16),
}

impl TimeFilter {
    /// Converts a raw slider value in `-1..=1439`
    pub fn from_slider(value: i32) -> Result<Self, TimeFilterError> {
        match value {
            ANY_TIME => Ok(TimeFilter::Any),
            v if (0..MINUTES_PER_DAY as i32).contains(&v) => Ok(TimeFilter::Minute(v as u16)),
            v => Err(TimeFilterError::OutOfRange(v)),
        }
    }

    pub fn slider_value(&self) -> i32 {
        match self {
            TimeFilter::Any => ANY_TIME,
            TimeFilter::Minute(m) => *m as i32,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, TimeFilter::Minute(_))
    }

    /// Checks that a minute filter lies within the day
    pub fn validate(self) -> Result<Self, TimeFilterError> {
        match self {
            TimeFilter::Minute(m) if m >= MINUTES_PER_DAY => {
                Err(TimeFilterError::OutOfRange(m as i32))
            }
            filter => Ok(filter),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Any => f.write_str("(any time)"),
            TimeFilter::Minute(m) => match format_time(*m) {
                Some(time) => f.write_str(&time),
                None => write!(f, "(invalid minute {m})"),
            },
        }
    }
}

/// Formats a minute of the day as `h:mm AM`, `None` past the end of the day
pub fn format_time(minutes: u16) -> Option<String> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }

    let hour = minutes / 60;
    let minute = minutes % 60;
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{hour}:{minute:02} {period}"))
}

fn within_window(trip_minute: u16, filter_minute: u16, window: u16) -> bool {
    (trip_minute as i32 - filter_minute as i32).abs() <= window as i32
}

/// Keeps trips that start or end within `window` minutes of the filter minute,
/// preserving their order. Distances are plain minute-of-day differences and do
/// not wrap around midnight.
pub fn filter_trips_by_time(trips: &[Trip], filter: TimeFilter, window: u16) -> Vec<&Trip> {
    match filter {
        TimeFilter::Any => trips.iter().collect(),
        TimeFilter::Minute(minute) => trips
            .iter()
            .filter(|trip| {
                within_window(trip.start_minute(), minute, window)
                    || within_window(trip.end_minute(), minute, window)
            })
            .collect(),
    }
}
