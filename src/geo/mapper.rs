use crate::geo::{GeoError, GeoPoint};

/// Longitude 0 sits on the globe texture seam, a quarter turn past the +x axis.
const TEXTURE_SEAM_DEGREES: f64 = 270.0;

/// A point on (or just above) a sphere centered at the origin, in globe scene units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SurfacePoint3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SurfacePoint3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        SurfacePoint3D { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Places `geo` on a sphere of the given radius, using the orientation of the globe texture.
pub fn to_surface_point(geo: GeoPoint, radius: f64) -> SurfacePoint3D {
    let phi = (90.0 - geo.latitude()).to_radians();
    let theta = (geo.longitude() + 180.0).to_radians();

    SurfacePoint3D {
        x: -radius * phi.sin() * theta.cos(),
        y: radius * phi.cos(),
        z: radius * phi.sin() * theta.sin(),
    }
}

/// Inverse of [`to_surface_point`]. The point is normalized first, so any radius works.
///
/// At the poles the longitude is arbitrary but always within range.
pub fn to_geo_point(point: SurfacePoint3D) -> Result<GeoPoint, GeoError> {
    let length = point.length();
    if !length.is_finite() || length == 0.0 {
        return Err(GeoError::Indeterminate);
    }

    let x = point.x / length;
    let y = (point.y / length).clamp(-1.0, 1.0);
    let z = point.z / length;

    let latitude = 90.0 - y.acos().to_degrees();
    // rem_euclid keeps the result non-negative for negative dividends near the seam
    let longitude = (TEXTURE_SEAM_DEGREES - x.atan2(-z).to_degrees()).rem_euclid(360.0) - 180.0;

    GeoPoint::new(latitude, longitude)
}
