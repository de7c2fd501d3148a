use crate::app_config::AppConfig;
use crate::asteroid::{AsteroidPreset, ImpactParameters, ParameterError};
use crate::backend::{BackendError, ImpactBackend, ImpactRequest, ImpactResults};
use crate::extensions::LockOrRecover;
use crate::geo::GeoPoint;
use crate::location::{ImpactLocationState, Origin, Subscription};
use crate::notify::{Level, Notifier};
use crate::view::{
    CraterOverlay, GlobeAdapter, GlobeCamera, GlobeSurface, InvalidDiameter, MapAdapter, MapSurface, MapViewport, PickError,
    ViewAdapter, attach,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Ties the shared impact location, both views, the backend and the notifications together.
#[derive(Debug)]
pub struct Simulator<M: MapSurface + 'static, G: GlobeSurface + 'static> {
    state: Arc<ImpactLocationState>,
    map: Arc<Mutex<MapAdapter<M>>>,
    globe: Arc<Mutex<GlobeAdapter<G>>>,
    backend: Arc<dyn ImpactBackend>,
    notifier: Arc<dyn Notifier>,
    parameters: Mutex<ImpactParameters>,
    gallery: Mutex<Vec<AsteroidPreset>>,
    busy: AtomicBool,
    _subscriptions: Vec<Subscription>,
}

impl<M: MapSurface + 'static, G: GlobeSurface + 'static> Simulator<M, G> {
    pub fn new(config: &AppConfig, backend: Arc<dyn ImpactBackend>, notifier: Arc<dyn Notifier>, map_surface: M, globe_surface: G) -> Self {
        let state = ImpactLocationState::new(config.location().default_location());

        let map_config = config.map();
        let viewport = MapViewport::new(map_config.width(), map_config.height(), map_config.center(), map_config.zoom())
            .with_zoom_limits(map_config.min_zoom(), map_config.max_zoom());
        let map = Arc::new(Mutex::new(MapAdapter::new(state.get(), map_surface, viewport)));

        let globe_config = config.globe();
        let mut camera = GlobeCamera::new(globe_config.width(), globe_config.height(), globe_config.camera_distance())
            .with_fov(globe_config.fov_degrees())
            .with_distance_limits(globe_config.min_distance(), globe_config.max_distance());
        camera.zoom_to(globe_config.camera_distance());
        let globe = Arc::new(Mutex::new(
            GlobeAdapter::new(state.get(), globe_surface, camera)
                .with_altitudes(globe_config.marker_altitude(), globe_config.crater_altitude()),
        ));

        let subscriptions = vec![attach(&state, &map), attach(&state, &globe)];

        Simulator {
            state,
            map,
            globe,
            backend,
            notifier,
            parameters: Mutex::new(config.simulation().defaults().clone()),
            gallery: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
            _subscriptions: subscriptions,
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.state.get()
    }

    pub fn parameters(&self) -> ImpactParameters {
        self.parameters.lock_or_recover().clone()
    }

    pub fn set_parameters(&self, parameters: ImpactParameters) {
        *self.parameters.lock_or_recover() = parameters;
    }

    pub fn map(&self) -> &Arc<Mutex<MapAdapter<M>>> {
        &self.map
    }

    pub fn globe(&self) -> &Arc<Mutex<GlobeAdapter<G>>> {
        &self.globe
    }

    /// Moves the impact location on behalf of the program; both views follow.
    pub fn set_location(&self, location: GeoPoint) {
        self.state.set(location, Origin::Programmatic);
    }

    pub fn pick_on_map(&self, x: f64, y: f64) -> Result<GeoPoint, PickError> {
        let located = self.map.lock_or_recover().locate(x, y);
        self.move_to(&self.map, located)
    }

    pub fn pick_on_globe(&self, x: f64, y: f64) -> Result<GeoPoint, PickError> {
        let located = self.globe.lock_or_recover().locate(x, y);
        self.move_to(&self.globe, located)
    }

    /// Rotates the globe camera, like dragging the globe with the mouse.
    pub fn orbit_globe(&self, delta_azimuth_degrees: f64, delta_elevation_degrees: f64) {
        let mut globe = self.globe.lock_or_recover();
        let camera = globe.camera_mut();
        camera.orbit(delta_azimuth_degrees, delta_elevation_degrees);
        debug!(distance = camera.distance(), "🌍 Orbited the globe camera to {}", camera.eye());
    }

    // The adapter lock is released before `set`, which may deliver queued updates to any view
    fn move_to<A: ViewAdapter>(&self, adapter: &Mutex<A>, located: Result<GeoPoint, PickError>) -> Result<GeoPoint, PickError> {
        let location = match located {
            Ok(location) => location,
            Err(e) => {
                debug!("📍 Ignored pick: {}", e);
                self.notifier.notify(Level::Info, "Pick a point on the Earth to move the impact location.".to_string());
                return Err(e);
            }
        };

        let previous = self.state.get();
        let id = adapter.lock_or_recover().id();
        self.state.set(location, Origin::Surface(id));

        // The origin is not notified, so it catches up with whatever is current by now
        adapter.lock_or_recover().show_location(self.state.get());

        #[rustfmt::skip]
        info!(surface = %id, origin = ?self.state.origin(), "📍 Impact location moved to {}, {:.0} km from {}", location, previous.distance_km(&location), previous);
        Ok(location)
    }

    #[instrument(skip(self))]
    pub async fn load_gallery(&self) -> Result<Vec<AsteroidPreset>, SimulatorError> {
        match self.backend.asteroid_gallery().await {
            Ok(asteroids) => {
                *self.gallery.lock_or_recover() = asteroids.clone();
                Ok(asteroids)
            }
            Err(e) => {
                warn!("⚠️ Could not load the asteroid gallery: {}", e);
                self.notifier.notify(Level::Error, "Failed to load asteroids from backend.".to_string());
                Err(e.into())
            }
        }
    }

    /// Prefills the parameters from a gallery asteroid.
    pub fn select_preset(&self, id: &str) -> Result<AsteroidPreset, SimulatorError> {
        let preset = self
            .gallery
            .lock_or_recover()
            .iter()
            .find(|preset| preset.id == id)
            .cloned()
            .ok_or_else(|| SimulatorError::UnknownPreset(id.to_string()))?;

        self.parameters.lock_or_recover().apply_preset(&preset);
        info!(preset_id = %preset.id, composition = %preset.composition(), "☄️ Selected {}", preset.display_name());
        if let Some(description) = &preset.description {
            debug!("☄️ {}", description);
        }

        Ok(preset)
    }

    /// Runs the simulation for the current parameters and impact location and draws the
    /// resulting crater on both views.
    ///
    /// On failure the user is notified and both the location and any previous crater stay
    /// as they were.
    #[instrument(skip(self))]
    pub async fn simulate(&self) -> Result<ImpactResults, SimulatorError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(SimulatorError::Busy);
        }
        let _busy = BusyGuard(&self.busy);

        let result = self.run_simulation().await;
        if let Err(e) = &result {
            self.notifier.notify(Level::Error, e.to_string());
        }
        result
    }

    async fn run_simulation(&self) -> Result<ImpactResults, SimulatorError> {
        let parameters = self.parameters();
        parameters.validate()?;

        let request = ImpactRequest::new(&parameters, self.state.get());
        info!("☄️ Running impact simulation...");
        let results = self.backend.calculate_impact(&request).await?;

        // The location may have moved while the request was in flight
        let overlay = CraterOverlay::new(self.state.get(), results.estimated_crater_diameter_km)?;
        self.map.lock_or_recover().show_crater(Some(&overlay));
        self.globe.lock_or_recover().show_crater(Some(&overlay));

        info!("☄️ Running impact simulation... OK");
        for line in results.report_lines() {
            info!("☄️ {}", line);
        }

        Ok(results)
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("a simulation is already running")]
    Busy,
    #[error("unknown asteroid '{0}'")]
    UnknownPreset(String),
    #[error("invalid impact parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("simulation failed: {0}")]
    Backend(#[from] BackendError),
    #[error("simulation failed: {0}")]
    InvalidCrater(#[from] InvalidDiameter),
}
