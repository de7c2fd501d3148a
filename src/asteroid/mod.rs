mod composition;
mod impact_parameters;
mod preset;

pub use composition::Composition;
pub use impact_parameters::{ImpactParameters, ParameterError};
pub use preset::AsteroidPreset;
