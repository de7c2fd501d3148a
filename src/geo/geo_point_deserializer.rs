use crate::geo::GeoPoint;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        GeoPoint::new(inner.latitude, inner.longitude).map_err(|e| Error::custom(format!("invalid location: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_valid_location() {
        let point: GeoPoint = serde_json::from_str(r#"{"latitude": 28.7, "longitude": 77.1}"#).unwrap();

        assert_eq!(point, GeoPoint::new(28.7, 77.1).unwrap());
    }

    #[test]
    fn rejects_an_out_of_range_latitude() {
        let error = serde_json::from_str::<GeoPoint>(r#"{"latitude": 128.7, "longitude": 77.1}"#).unwrap_err();

        assert!(error.to_string().contains("invalid latitude: 128.7"), "unexpected error: {}", error);
    }

    #[test]
    fn rejects_an_out_of_range_longitude() {
        let error = serde_json::from_str::<GeoPoint>(r#"{"latitude": 28.7, "longitude": -277.1}"#).unwrap_err();

        assert!(error.to_string().contains("invalid longitude: -277.1"), "unexpected error: {}", error);
    }
}
