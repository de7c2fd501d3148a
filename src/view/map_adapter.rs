use crate::geo::GeoPoint;
use crate::location::SurfaceId;
use crate::view::map_viewport::circle_bounds;
use crate::view::{CraterOverlay, MapViewport, PickError, ViewAdapter};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Drawing primitives of a flat tile map.
pub trait MapSurface: Debug + Send {
    fn place_marker(&mut self, at: GeoPoint);

    fn set_view(&mut self, center: GeoPoint, zoom: f64);

    fn draw_circle(&mut self, center: GeoPoint, radius_m: f64);

    fn remove_circle(&mut self);
}

/// Shows the impact location as a marker on a 2D map and turns clicks into new locations.
#[derive(Debug)]
pub struct MapAdapter<S: MapSurface> {
    surface: S,
    viewport: MapViewport,
}

impl<S: MapSurface> MapAdapter<S> {
    pub fn new(location: GeoPoint, mut surface: S, viewport: MapViewport) -> Self {
        surface.set_view(viewport.center(), viewport.zoom());
        surface.place_marker(location);

        MapAdapter { surface, viewport }
    }

    /// Resolves a click on the container pixel `(x, y)` to the location under it.
    ///
    /// Nothing is drawn; the caller moves the shared location and then calls
    /// [`ViewAdapter::show_location`], which leaves the view where the user put it.
    #[instrument(skip(self))]
    pub fn locate(&self, x: f64, y: f64) -> Result<GeoPoint, PickError> {
        let location = self.viewport.pixel_to_geo(x, y).ok_or(PickError::Miss {
            surface: self.id(),
            x,
            y,
        })?;

        debug!("🗺️ Picked {} on the map", location);
        Ok(location)
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: MapSurface> ViewAdapter for MapAdapter<S> {
    fn id(&self) -> SurfaceId {
        SurfaceId::MAP
    }

    fn show_location(&mut self, location: GeoPoint) {
        self.surface.place_marker(location);
    }

    fn on_external_update(&mut self, location: GeoPoint) {
        self.show_location(location);
        self.viewport.pan_to(location);
        self.surface.set_view(self.viewport.center(), self.viewport.zoom());
    }

    fn show_crater(&mut self, overlay: Option<&CraterOverlay>) {
        self.surface.remove_circle();

        let Some(overlay) = overlay.filter(|overlay| overlay.is_visible()) else {
            return;
        };

        let radius_m = overlay.diameter_km() * 1000.0 / 2.0;
        self.surface.draw_circle(overlay.center(), radius_m);
        self.viewport.fit_bounds(&circle_bounds(overlay.center(), radius_m));
        self.surface.set_view(self.viewport.center(), self.viewport.zoom());
    }
}
