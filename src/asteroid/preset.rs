use crate::asteroid::Composition;
use serde::Deserialize;

/// An asteroid from the backend gallery, used to prefill the impact parameters.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct AsteroidPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    pub diameter_km: f64,
    pub typical_velocity_km_s: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub composition: Option<String>,
}

impl AsteroidPreset {
    pub fn composition(&self) -> Composition {
        Composition::parse(self.composition.as_deref().unwrap_or("stony"))
    }

    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}
