use nalgebra::{Isometry3, Perspective3, Point3, Unit, Vector3};

const MAX_ELEVATION_DEGREES: f64 = 85.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

/// A perspective camera orbiting the globe, always looking at its center.
#[derive(Clone, PartialEq, Debug)]
pub struct GlobeCamera {
    width: f64,
    height: f64,
    fov_y_degrees: f64,
    near: f64,
    far: f64,
    distance: f64,
    min_distance: f64,
    max_distance: f64,
    azimuth_degrees: f64,
    elevation_degrees: f64,
}

impl GlobeCamera {
    /// A camera on the +z axis at `distance` from the globe center.
    pub fn new(width: f64, height: f64, distance: f64) -> Self {
        GlobeCamera {
            width,
            height,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            distance: distance.clamp(1.5, 5.0),
            min_distance: 1.5,
            max_distance: 5.0,
            azimuth_degrees: 0.0,
            elevation_degrees: 0.0,
        }
    }

    pub fn with_distance_limits(mut self, min_distance: f64, max_distance: f64) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
        self
    }

    pub fn with_fov(mut self, fov_y_degrees: f64) -> Self {
        self.fov_y_degrees = fov_y_degrees;
        self
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn eye(&self) -> Point3<f64> {
        let azimuth = self.azimuth_degrees.to_radians();
        let elevation = self.elevation_degrees.to_radians();

        Point3::new(
            self.distance * elevation.cos() * azimuth.sin(),
            self.distance * elevation.sin(),
            self.distance * elevation.cos() * azimuth.cos(),
        )
    }

    /// Rotates the camera around the globe. Elevation stops short of the poles.
    pub fn orbit(&mut self, delta_azimuth_degrees: f64, delta_elevation_degrees: f64) {
        self.azimuth_degrees = (self.azimuth_degrees + delta_azimuth_degrees).rem_euclid(360.0);
        self.elevation_degrees =
            (self.elevation_degrees + delta_elevation_degrees).clamp(-MAX_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES);
    }

    pub fn zoom_to(&mut self, distance: f64) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Converts a pixel of the globe container into normalized device coordinates.
    pub fn ndc_from_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        ((x / self.width) * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0)
    }

    /// The ray through the given normalized device coordinates, in world space.
    pub fn pick_ray(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let projection = Perspective3::new(self.width / self.height, self.fov_y_degrees.to_radians(), self.near, self.far);
        let camera_to_world = Isometry3::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y()).inverse();

        let near = camera_to_world * projection.unproject_point(&Point3::new(ndc_x, ndc_y, -1.0));
        let far = camera_to_world * projection.unproject_point(&Point3::new(ndc_x, ndc_y, 1.0));

        Ray {
            origin: near,
            direction: Unit::new_normalize(far - near),
        }
    }
}

/// The closest point where `ray` enters a sphere of `radius` around the origin.
pub fn intersect_sphere(ray: &Ray, radius: f64) -> Option<Point3<f64>> {
    let offset = ray.origin.coords;
    let direction = ray.direction.into_inner();
    let b = offset.dot(&direction);
    let c = offset.dot(&offset) - radius * radius;

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t = if -b - root >= 0.0 { -b - root } else { -b + root };
    if t < 0.0 {
        return None;
    }

    Some(ray.origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    fn assert_point(actual: Point3<f64>, x: f64, y: f64, z: f64) {
        assert!(
            (actual.x - x).abs() < TOLERANCE && (actual.y - y).abs() < TOLERANCE && (actual.z - z).abs() < TOLERANCE,
            "expected {:?} to be ({}, {}, {})",
            actual,
            x,
            y,
            z
        );
    }

    #[rstest]
    #[case(400.0, 300.0, (0.0, 0.0))]
    #[case(0.0, 0.0, (-1.0, 1.0))]
    #[case(800.0, 600.0, (1.0, -1.0))]
    fn ndc_from_pixel_flips_the_vertical_axis(#[case] x: f64, #[case] y: f64, #[case] expected: (f64, f64)) {
        let camera = GlobeCamera::new(800.0, 600.0, 3.5);

        assert_eq!(camera.ndc_from_pixel(x, y), expected);
    }

    #[test]
    fn center_ray_hits_the_globe_facing_the_camera() {
        let camera = GlobeCamera::new(800.0, 600.0, 3.5);

        let hit = intersect_sphere(&camera.pick_ray(0.0, 0.0), 1.0).unwrap();

        assert_point(hit, 0.0, 0.0, 1.0);
    }

    #[rstest]
    #[case(90.0, 0.0, (1.0, 0.0, 0.0))]
    #[case(180.0, 0.0, (0.0, 0.0, -1.0))]
    #[case(0.0, 30.0, (0.0, 0.5, 0.866_025_403_784_438_6))]
    fn orbiting_changes_the_point_under_the_center(#[case] azimuth: f64, #[case] elevation: f64, #[case] expected: (f64, f64, f64)) {
        let mut camera = GlobeCamera::new(800.0, 600.0, 3.5);
        camera.orbit(azimuth, elevation);

        let hit = intersect_sphere(&camera.pick_ray(0.0, 0.0), 1.0).unwrap();

        assert_point(hit, expected.0, expected.1, expected.2);
    }

    #[test]
    fn orbit_stops_short_of_the_poles() {
        let mut camera = GlobeCamera::new(800.0, 600.0, 3.5);

        camera.orbit(0.0, 120.0);

        assert!(camera.eye().z > 0.0);
        assert!((camera.eye().y - 3.5 * 85f64.to_radians().sin()).abs() < TOLERANCE);
    }

    #[test]
    fn corner_rays_miss_the_globe() {
        let camera = GlobeCamera::new(800.0, 600.0, 3.5);

        assert_eq!(intersect_sphere(&camera.pick_ray(-1.0, 1.0), 1.0), None);
    }

    #[test]
    fn zoom_is_clamped_to_the_distance_limits() {
        let mut camera = GlobeCamera::new(800.0, 600.0, 3.5);

        camera.zoom_to(0.5);
        assert_eq!(camera.distance(), 1.5);

        camera.zoom_to(50.0);
        assert_eq!(camera.distance(), 5.0);
    }

    #[test]
    fn intersect_sphere_ignores_spheres_behind_the_ray() {
        let ray = Ray {
            origin: Point3::new(0.0, 0.0, 3.0),
            direction: Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0)),
        };

        assert_eq!(intersect_sphere(&ray, 1.0), None);
    }

    #[test]
    fn intersect_sphere_from_inside_returns_the_exit_point() {
        let ray = Ray {
            origin: Point3::origin(),
            direction: Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0)),
        };

        assert_point(intersect_sphere(&ray, 1.0).unwrap(), 0.0, 1.0, 0.0);
    }
}
