use crate::app_config::AppConfig;
use crate::backend::HttpBackend;
use crate::extensions::LockOrRecover;
use crate::notify::NotificationCenter;
use crate::simulator::Simulator;
use crate::view::{HeadlessGlobe, HeadlessMap};
use std::sync::Arc;
use tracing::{info, warn};

mod app_config;
mod asteroid;
mod backend;
mod extensions;
mod geo;
mod location;
mod notify;
mod simulator;
mod view;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = backend::new_client(&config)?;
    let backend = Arc::new(HttpBackend::new(client, config.backend().url()));
    let notifications = Arc::new(NotificationCenter::new(config.notifications().lifetime()));

    let simulator = Simulator::new(&config, backend, notifications.clone(), HeadlessMap::default(), HeadlessGlobe::default());
    info!("✅  Initialized map and globe at {}", simulator.location());

    if simulator.load_gallery().await.is_ok() {
        info!("✅  Loaded asteroid gallery");
        if let Some(preset_id) = config.simulation().preset() {
            if let Err(e) = simulator.select_preset(preset_id) {
                warn!("⚠️ Could not select preset: {}", e);
                simulator.set_parameters(config.simulation().defaults().clone());
            }
        }
    }

    for [x, y] in config.session().map_clicks() {
        simulator.pick_on_map(*x, *y).ok();
    }
    let [azimuth, elevation] = config.session().globe_orbit();
    simulator.orbit_globe(azimuth, elevation);
    for [x, y] in config.session().globe_clicks() {
        simulator.pick_on_globe(*x, *y).ok();
    }

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    match simulator.simulate().await {
        Ok(results) => info!("✅  Simulation complete at {}:\n{}", simulator.location(), results),
        Err(e) => warn!("⚠️ Simulation failed: {}", e),
    }

    {
        let map = simulator.map().lock_or_recover();
        let globe = simulator.globe().lock_or_recover();
        info!(marker = ?map.surface().marker(), view = ?map.surface().view(), zoom = map.viewport().zoom(), crater = ?map.surface().circle(), "🗺️ Final map scene");
        info!(pin = ?globe.surface().pin(), crater = ?globe.surface().disc(), "🌍 Final globe scene");
    }

    for notification in notifications.active() {
        info!(level = ?notification.level, "💬 Pending notification: {}", notification.message);
    }

    Ok(())
}
