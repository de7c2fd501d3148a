use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Mean radius of the Earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A location on the Earth's surface in degrees.
///
/// The latitude is always within `[-90, 90]` and the longitude within `[-180, 180]`, so a
/// `GeoPoint` can only be built through [`GeoPoint::new`] or deserialization, which both
/// validate the ranges.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }

        Ok(GeoPoint { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` using the haversine formula.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos() * other.latitude.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    InvalidLongitude(f64),
    #[error("the point has no defined direction from the sphere center")]
    Indeterminate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(28.7, 77.1)]
    fn new_accepts_coordinates_in_range(#[case] latitude: f64, #[case] longitude: f64) {
        let point = GeoPoint::new(latitude, longitude).unwrap();

        assert_eq!(point.latitude(), latitude);
        assert_eq!(point.longitude(), longitude);
    }

    #[rstest]
    #[case(90.1, 0.0, GeoError::InvalidLatitude(90.1))]
    #[case(-91.0, 0.0, GeoError::InvalidLatitude(-91.0))]
    #[case(0.0, 180.5, GeoError::InvalidLongitude(180.5))]
    #[case(0.0, -360.0, GeoError::InvalidLongitude(-360.0))]
    fn new_rejects_coordinates_out_of_range(#[case] latitude: f64, #[case] longitude: f64, #[case] expected: GeoError) {
        assert_eq!(GeoPoint::new(latitude, longitude), Err(expected));
    }

    #[test]
    fn new_rejects_nan() {
        assert!(matches!(GeoPoint::new(f64::NAN, 0.0), Err(GeoError::InvalidLatitude(_))));
        assert!(matches!(GeoPoint::new(0.0, f64::NAN), Err(GeoError::InvalidLongitude(_))));
    }

    #[test]
    fn distance_km_between_poles_is_half_the_circumference() {
        let north = GeoPoint::new(90.0, 0.0).unwrap();
        let south = GeoPoint::new(-90.0, 0.0).unwrap();

        let distance = north.distance_km(&south);

        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn distance_km_to_itself_is_zero() {
        let delhi = GeoPoint::new(28.7, 77.1).unwrap();

        assert_eq!(delhi.distance_km(&delhi), 0.0);
    }
}
