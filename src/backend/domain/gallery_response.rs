use crate::asteroid::AsteroidPreset;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GalleryResponse {
    pub asteroids: Vec<AsteroidPreset>,
}
