use crate::asteroid::ImpactParameters;
use crate::geo::GeoPoint;
use serde::Serialize;

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ImpactRequest {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    pub angle_degrees: f64,
    pub density_kg_m3: f64,
    pub impact_lat: f64,
    pub impact_lng: f64,
}

impl ImpactRequest {
    pub fn new(parameters: &ImpactParameters, location: GeoPoint) -> Self {
        ImpactRequest {
            diameter_km: parameters.diameter_km,
            velocity_km_s: parameters.velocity_km_s,
            angle_degrees: parameters.angle_degrees,
            density_kg_m3: parameters.density_kg_m3,
            impact_lat: location.latitude(),
            impact_lng: location.longitude(),
        }
    }
}
