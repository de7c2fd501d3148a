use crate::geo::{GeoPoint, SurfacePoint3D, to_geo_point, to_surface_point};
use crate::location::SurfaceId;
use crate::view::{CraterOverlay, GlobeCamera, PickError, ViewAdapter, intersect_sphere};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Mean diameter of the Earth, which the globe renders with radius 1.
pub const EARTH_DIAMETER_KM: f64 = 12742.0;

const GLOBE_RADIUS: f64 = 1.0;

/// Drawing primitives of a 3D globe scene.
pub trait GlobeSurface: Debug + Send {
    fn place_pin(&mut self, at: SurfacePoint3D);

    /// Draws a disc of `radius` scene units at `center`, facing the globe center.
    fn draw_disc(&mut self, center: SurfacePoint3D, radius: f64);

    fn remove_disc(&mut self);
}

/// Shows the impact location as a pin on a 3D globe and turns clicks into new locations.
#[derive(Debug)]
pub struct GlobeAdapter<S: GlobeSurface> {
    location: GeoPoint,
    surface: S,
    camera: GlobeCamera,
    marker_altitude: f64,
    crater_altitude: f64,
}

impl<S: GlobeSurface> GlobeAdapter<S> {
    pub fn new(location: GeoPoint, mut surface: S, camera: GlobeCamera) -> Self {
        let marker_altitude = 1.02;
        surface.place_pin(to_surface_point(location, marker_altitude));

        GlobeAdapter {
            location,
            surface,
            camera,
            marker_altitude,
            crater_altitude: 1.001,
        }
    }

    /// Sets the radii at which the pin and the crater float above the unit sphere.
    pub fn with_altitudes(mut self, marker_altitude: f64, crater_altitude: f64) -> Self {
        self.marker_altitude = marker_altitude;
        self.crater_altitude = crater_altitude;
        self.surface.place_pin(to_surface_point(self.location, marker_altitude));
        self
    }

    /// Casts a ray through the clicked container pixel and resolves where it hits the globe.
    /// Clicks next to the globe are rejected. Nothing is drawn.
    #[instrument(skip(self))]
    pub fn locate(&self, x: f64, y: f64) -> Result<GeoPoint, PickError> {
        let (ndc_x, ndc_y) = self.camera.ndc_from_pixel(x, y);
        let ray = self.camera.pick_ray(ndc_x, ndc_y);

        let hit = intersect_sphere(&ray, GLOBE_RADIUS).ok_or(PickError::Miss {
            surface: self.id(),
            x,
            y,
        })?;
        let location = to_geo_point(SurfacePoint3D::new(hit.x, hit.y, hit.z))?;

        debug!("🌍 Picked {} on the globe", location);
        Ok(location)
    }

    pub fn camera_mut(&mut self) -> &mut GlobeCamera {
        &mut self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: GlobeSurface> ViewAdapter for GlobeAdapter<S> {
    fn id(&self) -> SurfaceId {
        SurfaceId::GLOBE
    }

    fn show_location(&mut self, location: GeoPoint) {
        self.location = location;
        self.surface.place_pin(to_surface_point(location, self.marker_altitude));
    }

    fn show_crater(&mut self, overlay: Option<&CraterOverlay>) {
        self.surface.remove_disc();

        let Some(overlay) = overlay.filter(|overlay| overlay.is_visible()) else {
            return;
        };

        let radius = overlay.diameter_km() / EARTH_DIAMETER_KM;
        self.surface.draw_disc(to_surface_point(overlay.center(), self.crater_altitude), radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessGlobe;
    use pretty_assertions::assert_eq;

    fn geo(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    fn adapter(location: GeoPoint) -> GlobeAdapter<HeadlessGlobe> {
        GlobeAdapter::new(location, HeadlessGlobe::default(), GlobeCamera::new(800.0, 600.0, 3.5))
    }

    #[test]
    fn new_places_the_pin_above_the_given_location() {
        let globe = adapter(geo(28.7, 77.1));

        assert_eq!(globe.surface().pin(), Some(to_surface_point(geo(28.7, 77.1), 1.02)));
    }

    #[test]
    fn locate_at_the_center_of_the_default_view() {
        let globe = adapter(geo(28.7, 77.1));

        let location = globe.locate(400.0, 300.0).unwrap();

        assert!(location.latitude().abs() < 1e-9);
        assert!((location.longitude() + 90.0).abs() < 1e-9);
        assert_eq!(globe.surface().pin(), Some(to_surface_point(geo(28.7, 77.1), 1.02)));
    }

    #[test]
    fn locate_after_orbiting_follows_the_camera() {
        let mut globe = adapter(geo(28.7, 77.1));
        globe.camera_mut().orbit(90.0, 0.0);

        let location = globe.locate(400.0, 300.0).unwrap();

        assert!(location.latitude().abs() < 1e-9);
        assert!(location.longitude().abs() < 1e-9);
    }

    #[test]
    fn locate_next_to_the_globe_is_a_miss() {
        let globe = adapter(geo(28.7, 77.1));

        let result = globe.locate(0.0, 0.0);

        assert_eq!(
            result,
            Err(PickError::Miss {
                surface: SurfaceId::GLOBE,
                x: 0.0,
                y: 0.0
            })
        );
        assert_eq!(globe.surface().pin(), Some(to_surface_point(geo(28.7, 77.1), 1.02)));
    }

    #[test]
    fn on_external_update_moves_the_pin() {
        let mut globe = adapter(geo(28.7, 77.1)).with_altitudes(1.05, 1.002);

        globe.on_external_update(geo(-10.0, 30.0));

        assert_eq!(globe.surface().pin(), Some(to_surface_point(geo(-10.0, 30.0), 1.05)));
    }

    #[test]
    fn with_altitudes_lifts_the_pin_of_the_last_shown_location() {
        let mut globe = adapter(geo(28.7, 77.1));
        globe.show_location(geo(-10.0, 30.0));

        let globe = globe.with_altitudes(1.05, 1.002);

        assert_eq!(globe.surface().pin(), Some(to_surface_point(geo(-10.0, 30.0), 1.05)));
    }

    #[test]
    fn show_crater_scales_the_disc_relative_to_the_earth_diameter() {
        let mut globe = adapter(geo(10.0, 20.0));
        let overlay = CraterOverlay::new(geo(10.0, 20.0), 12.0).unwrap();

        globe.show_crater(Some(&overlay));

        assert_eq!(globe.surface().disc(), Some((to_surface_point(geo(10.0, 20.0), 1.001), 12.0 / 12742.0)));
    }

    #[test]
    fn larger_craters_draw_larger_discs() {
        let mut globe = adapter(geo(10.0, 20.0));

        globe.show_crater(Some(&CraterOverlay::new(geo(10.0, 20.0), 12.0).unwrap()));
        let small = globe.surface().disc().unwrap().1;
        globe.show_crater(Some(&CraterOverlay::new(geo(10.0, 20.0), 120.0).unwrap()));
        let large = globe.surface().disc().unwrap().1;

        assert!(large > small);
    }

    #[test]
    fn zero_diameter_and_none_both_clear_the_disc() {
        let mut globe = adapter(geo(10.0, 20.0));
        let crater = CraterOverlay::new(geo(10.0, 20.0), 12.0).unwrap();

        globe.show_crater(Some(&crater));
        globe.show_crater(Some(&CraterOverlay::new(geo(10.0, 20.0), 0.0).unwrap()));
        assert_eq!(globe.surface().disc(), None);

        globe.show_crater(Some(&crater));
        globe.show_crater(None);
        assert_eq!(globe.surface().disc(), None);
    }
}
