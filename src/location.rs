use serde::{Deserialize, Serialize};
use std::string::String;

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64, name: String) -> Location {
        Location {
            name,
            latitude: lat,
            longitude: lon,
        }
    }

    /// Coordinates in GeoJSON order, longitude first
    pub fn lnglat(&self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn test_lnglat_order() {
        let location = Location::new(42.36027, -71.09415, "MIT".into());
        assert_eq!(location.lnglat(), vec![-71.09415, 42.36027]);
        assert!(location.is_valid());
    }

    #[test]
    fn test_invalid_location() {
        let location = Location::new(f64::NAN, 0.0, "".into());
        assert!(!location.is_valid());

        let location = Location::new(42.0, 200.0, "".into());
        assert!(!location.is_valid());
    }
}
