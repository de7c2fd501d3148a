mod geo_point;
mod geo_point_deserializer;
mod mapper;

pub use geo_point::{EARTH_RADIUS_KM, GeoError, GeoPoint};
pub use mapper::{SurfacePoint3D, to_geo_point, to_surface_point};
