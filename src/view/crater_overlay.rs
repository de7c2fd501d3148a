use crate::geo::GeoPoint;
use thiserror::Error;

/// The crater of a simulated impact, centered on the impact location.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CraterOverlay {
    center: GeoPoint,
    diameter_km: f64,
}

impl CraterOverlay {
    pub fn new(center: GeoPoint, diameter_km: f64) -> Result<Self, InvalidDiameter> {
        if !(diameter_km.is_finite() && diameter_km >= 0.0) {
            return Err(InvalidDiameter(diameter_km));
        }

        Ok(CraterOverlay { center, diameter_km })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn diameter_km(&self) -> f64 {
        self.diameter_km
    }

    pub fn is_visible(&self) -> bool {
        self.diameter_km > 0.0
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("crater diameter must be a non-negative number, got {0} km")]
pub struct InvalidDiameter(pub f64);
