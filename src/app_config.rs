use crate::asteroid::ImpactParameters;
use crate::geo::GeoPoint;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    backend: Backend,
    location: Location,
    simulation: Simulation,
    map: Map,
    globe: Globe,
    notifications: Notifications,
    #[serde(default)]
    session: Session,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("IMPACTSIM").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn globe(&self) -> &Globe {
        &self.globe
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[derive(Debug, Deserialize)]
pub struct Backend {
    url: String,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    user_agent: String,
}

impl Backend {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, Deserialize)]
pub struct Location {
    default: GeoPoint,
}

impl Location {
    pub fn default_location(&self) -> GeoPoint {
        self.default
    }
}

#[derive(Debug, Deserialize)]
pub struct Simulation {
    defaults: ImpactParameters,
    preset: Option<String>,
}

impl Simulation {
    pub fn defaults(&self) -> &ImpactParameters {
        &self.defaults
    }

    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct Map {
    width: f64,
    height: f64,
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Map {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }
}

#[derive(Debug, Deserialize)]
pub struct Globe {
    width: f64,
    height: f64,
    fov_degrees: f64,
    camera_distance: f64,
    min_distance: f64,
    max_distance: f64,
    marker_altitude: f64,
    crater_altitude: f64,
}

impl Globe {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn marker_altitude(&self) -> f64 {
        self.marker_altitude
    }

    pub fn crater_altitude(&self) -> f64 {
        self.crater_altitude
    }
}

#[derive(Debug, Deserialize)]
pub struct Notifications {
    #[serde(with = "humantime_serde")]
    lifetime: Duration,
}

impl Notifications {
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

/// Scripted input for a headless run. Clicks are container pixel coordinates; the globe
/// orbit is an azimuth and elevation change in degrees, applied before the globe clicks.
#[derive(Debug, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    globe_orbit: [f64; 2],
    #[serde(default)]
    map_clicks: Vec<[f64; 2]>,
    #[serde(default)]
    globe_clicks: Vec<[f64; 2]>,
}

impl Session {
    pub fn globe_orbit(&self) -> [f64; 2] {
        self.globe_orbit
    }

    pub fn map_clicks(&self) -> &[[f64; 2]] {
        &self.map_clicks
    }

    pub fn globe_clicks(&self) -> &[[f64; 2]] {
        &self.globe_clicks
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                backend: Backend {
                    url: "http://127.0.0.1:5000".to_string(),
                    request_timeout: Duration::from_secs(5),
                    user_agent: "impactsim-test".to_string(),
                },
                location: Location {
                    default: GeoPoint::new(28.7, 77.1).unwrap(),
                },
                simulation: Simulation {
                    defaults: ImpactParameters::default(),
                    preset: None,
                },
                map: Map {
                    width: 800.0,
                    height: 600.0,
                    center: GeoPoint::new(20.0, 0.0).unwrap(),
                    zoom: 2.0,
                    min_zoom: 1.0,
                    max_zoom: 18.0,
                },
                globe: Globe {
                    width: 800.0,
                    height: 600.0,
                    fov_degrees: 45.0,
                    camera_distance: 3.5,
                    min_distance: 1.5,
                    max_distance: 5.0,
                    marker_altitude: 1.02,
                    crater_altitude: 1.001,
                },
                notifications: Notifications {
                    lifetime: Duration::from_secs(3),
                },
                session: Session::default(),
            },
        }
    }

    pub fn backend_url(mut self, url: String) -> Self {
        self.config.backend.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
