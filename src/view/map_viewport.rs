use crate::geo::{EARTH_RADIUS_KM, GeoPoint};
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
// Web Mercator cuts the world off here so that it is square
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// The visible part of a Web Mercator tile map, without horizontal wrapping.
#[derive(Clone, PartialEq, Debug)]
pub struct MapViewport {
    width: f64,
    height: f64,
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl MapViewport {
    pub fn new(width: f64, height: f64, center: GeoPoint, zoom: f64) -> Self {
        MapViewport {
            width,
            height,
            center,
            zoom,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan_to(&mut self, center: GeoPoint) {
        self.center = center;
    }

    /// Resolves a pixel of the map container, or `None` when the pixel shows no part of the world.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> Option<GeoPoint> {
        if !(0.0..=self.width).contains(&x) || !(0.0..=self.height).contains(&y) {
            return None;
        }

        let (center_x, center_y) = project(self.center, self.zoom);
        unproject(center_x + x - self.width / 2.0, center_y + y - self.height / 2.0, self.zoom)
    }

    /// Centers on `bounds` at the largest whole zoom level that still shows all of them.
    pub fn fit_bounds(&mut self, bounds: &GeoBounds) {
        let (west, south) = project(bounds.south_west, 0.0);
        let (east, north) = project(bounds.north_east, 0.0);

        let span_x = (east - west).abs().max(f64::EPSILON);
        let span_y = (south - north).abs().max(f64::EPSILON);
        let scale = (self.width / span_x).min(self.height / span_y);

        self.zoom = scale.log2().floor().clamp(self.min_zoom, self.max_zoom);
        if let Some(center) = unproject((west + east) / 2.0, (north + south) / 2.0, 0.0) {
            self.center = center;
        }
    }
}

/// The bounding box of a circle of `radius_m` meters around `center`.
pub fn circle_bounds(center: GeoPoint, radius_m: f64) -> GeoBounds {
    let lat_delta = (radius_m / (EARTH_RADIUS_KM * 1000.0)).to_degrees();
    let lat_cos = center.latitude().to_radians().cos();
    let lng_delta = if lat_cos > f64::EPSILON { lat_delta / lat_cos } else { 180.0 };

    let corner = |lat: f64, lng: f64| GeoPoint::new(lat.clamp(-90.0, 90.0), lng.clamp(-180.0, 180.0));

    GeoBounds {
        south_west: corner(center.latitude() - lat_delta, center.longitude() - lng_delta).unwrap_or(center),
        north_east: corner(center.latitude() + lat_delta, center.longitude() + lng_delta).unwrap_or(center),
    }
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

fn project(location: GeoPoint, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let sin = location.latitude().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians().sin();

    let x = (location.longitude() + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
    (x, y)
}

fn unproject(x: f64, y: f64, zoom: f64) -> Option<GeoPoint> {
    let size = world_size(zoom);
    if !(0.0..=size).contains(&x) || !(0.0..=size).contains(&y) {
        return None;
    }

    let longitude = x / size * 360.0 - 180.0;
    let latitude = (PI - 2.0 * PI * y / size).sinh().atan().to_degrees();
    GeoPoint::new(latitude, longitude).ok()
}
