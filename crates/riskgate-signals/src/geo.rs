//! Geographic helpers

use crate::error::SignalError;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Resolved location of an attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// ISO country code
    pub country: String,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, country: impl Into<String>) -> Self {
        Self { latitude, longitude, country: country.into() }
    }

    pub(crate) fn validate(&self) -> Result<(), SignalError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if !lat_ok || !lon_ok {
            return Err(SignalError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// Great-circle distance in kilometres
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let sf = GeoPoint::new(37.7749, -122.4194, "US");
        assert_eq!(haversine_km(&sf, &sf), 0.0);
    }

    #[test]
    fn test_known_distance() {
        let sf = GeoPoint::new(37.7749, -122.4194, "US");
        let ny = GeoPoint::new(40.7128, -74.0060, "US");
        let d = haversine_km(&sf, &ny);
        assert!((d - 4129.0).abs() < 10.0, "got {}", d);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0, "XX").validate().is_err());
        assert!(GeoPoint::new(0.0, -181.0, "XX").validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0, "XX").validate().is_err());
        assert!(GeoPoint::new(-33.87, 151.21, "AU").validate().is_ok());
    }
}
