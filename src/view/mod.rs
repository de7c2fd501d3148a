mod crater_overlay;
mod globe_adapter;
mod globe_camera;
mod headless;
mod map_adapter;
mod map_viewport;

pub use crater_overlay::{CraterOverlay, InvalidDiameter};
pub use globe_adapter::{GlobeAdapter, GlobeSurface};
pub use globe_camera::{GlobeCamera, intersect_sphere};
pub use headless::{HeadlessGlobe, HeadlessMap};
pub use map_adapter::{MapAdapter, MapSurface};
pub use map_viewport::MapViewport;

use crate::extensions::LockOrRecover;
use crate::geo::{GeoError, GeoPoint};
use crate::location::{ImpactLocationState, Subscription, SurfaceId};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// A rendering surface that shows the impact location and the crater of the last simulation.
pub trait ViewAdapter: Debug + Send {
    fn id(&self) -> SurfaceId;

    /// Moves the marker to `location` and leaves the rest of the view alone.
    fn show_location(&mut self, location: GeoPoint);

    /// Redraws the marker after another surface, or the program, moved the impact location.
    fn on_external_update(&mut self, location: GeoPoint) {
        self.show_location(location);
    }

    /// Replaces the crater overlay; `None` or a zero diameter clears it.
    fn show_crater(&mut self, overlay: Option<&CraterOverlay>);
}

#[derive(Error, Debug, PartialEq)]
pub enum PickError {
    #[error("pick at ({x}, {y}) is not on the {surface}")]
    Miss { surface: SurfaceId, x: f64, y: f64 },
    #[error("pick does not resolve to a location: {0}")]
    InvalidLocation(#[from] GeoError),
}

/// Subscribes `adapter` to location updates that did not originate from it.
///
/// The subscription only holds a weak reference, so dropping the adapter is enough to stop
/// the updates.
pub fn attach<A>(state: &Arc<ImpactLocationState>, adapter: &Arc<Mutex<A>>) -> Subscription
where
    A: ViewAdapter + 'static,
{
    let id = adapter.lock_or_recover().id();
    let adapter = Arc::downgrade(adapter);

    state.subscribe(id, move |update| {
        if let Some(adapter) = adapter.upgrade() {
            adapter.lock_or_recover().on_external_update(update.location);
        }
    })
}
