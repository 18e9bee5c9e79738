use serde::{Deserialize, Serialize};

use crate::time_filter::TimeFilter;

/// Output range of the station radius scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    /// Full-day counts are large, so circles are kept compact
    pub const UNFILTERED: RadiusRange = RadiusRange { min: 0.0, max: 25.0 };
    /// Hour-window counts are small, so circles are floored and exaggerated
    pub const FILTERED: RadiusRange = RadiusRange { min: 3.0, max: 50.0 };

    pub fn for_filter(filter: &TimeFilter) -> RadiusRange {
        if filter.is_set() {
            RadiusRange::FILTERED
        } else {
            RadiusRange::UNFILTERED
        }
    }
}

/// Square root scale from `[0, domain_max]` onto a radius range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    pub domain_max: f64,
    pub range: RadiusRange,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: RadiusRange) -> Self {
        SqrtScale { domain_max, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        // An empty domain collapses every input onto the range minimum
        if self.domain_max <= 0.0 || !self.domain_max.is_finite() {
            return self.range.min;
        }

        let t = value.max(0.0).sqrt() / self.domain_max.sqrt();
        self.range.min + t * (self.range.max - self.range.min)
    }
}

/// Maps `[0, 1]` onto a fixed set of evenly spaced output buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizeScale {
    pub buckets: Vec<f64>,
}

impl QuantizeScale {
    pub fn new(buckets: Vec<f64>) -> Self {
        QuantizeScale { buckets }
    }

    /// Departure ratio to flow intensity: mostly arrivals, balanced, mostly departures
    pub fn flow() -> Self {
        QuantizeScale::new(vec![0.0, 0.5, 1.0])
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }

        let n = self.buckets.len();
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let index = ((value * n as f64).floor() as usize).min(n - 1);
        self.buckets[index]
    }
}
