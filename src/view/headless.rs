use crate::geo::{GeoPoint, SurfacePoint3D};
use crate::view::{GlobeSurface, MapSurface};
use tracing::{debug, info};

/// A map that keeps its scene in memory and logs what it would draw.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    marker: Option<GeoPoint>,
    view: Option<(GeoPoint, f64)>,
    circle: Option<(GeoPoint, f64)>,
}

impl HeadlessMap {
    pub fn marker(&self) -> Option<GeoPoint> {
        self.marker
    }

    pub fn view(&self) -> Option<(GeoPoint, f64)> {
        self.view
    }

    pub fn circle(&self) -> Option<(GeoPoint, f64)> {
        self.circle
    }
}

impl MapSurface for HeadlessMap {
    fn place_marker(&mut self, at: GeoPoint) {
        debug!("🗺️ Map marker at {}", at);
        self.marker = Some(at);
    }

    fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        debug!("🗺️ Map view centered on {} at zoom {}", center, zoom);
        self.view = Some((center, zoom));
    }

    fn draw_circle(&mut self, center: GeoPoint, radius_m: f64) {
        info!("🗺️ Map crater at {} with a radius of {:.0} m", center, radius_m);
        self.circle = Some((center, radius_m));
    }

    fn remove_circle(&mut self) {
        if self.circle.take().is_some() {
            debug!("🗺️ Map crater removed");
        }
    }
}

/// A globe that keeps its scene in memory and logs what it would draw.
#[derive(Debug, Default)]
pub struct HeadlessGlobe {
    pin: Option<SurfacePoint3D>,
    disc: Option<(SurfacePoint3D, f64)>,
}

impl HeadlessGlobe {
    pub fn pin(&self) -> Option<SurfacePoint3D> {
        self.pin
    }

    pub fn disc(&self) -> Option<(SurfacePoint3D, f64)> {
        self.disc
    }
}

impl GlobeSurface for HeadlessGlobe {
    fn place_pin(&mut self, at: SurfacePoint3D) {
        debug!("🌍 Globe pin at ({:.4}, {:.4}, {:.4})", at.x, at.y, at.z);
        self.pin = Some(at);
    }

    fn draw_disc(&mut self, center: SurfacePoint3D, radius: f64) {
        info!("🌍 Globe crater at ({:.4}, {:.4}, {:.4}) with a radius of {:.6}", center.x, center.y, center.z, radius);
        self.disc = Some((center, radius));
    }

    fn remove_disc(&mut self) {
        if self.disc.take().is_some() {
            debug!("🌍 Globe crater removed");
        }
    }
}
