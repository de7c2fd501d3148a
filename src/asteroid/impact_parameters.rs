use crate::asteroid::AsteroidPreset;
use serde::Deserialize;
use thiserror::Error;

/// The user-controlled inputs of a simulation.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct ImpactParameters {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    pub angle_degrees: f64,
    pub density_kg_m3: f64,
}

impl ImpactParameters {
    /// Copies size, speed and density from `preset`. The impact angle is kept.
    pub fn apply_preset(&mut self, preset: &AsteroidPreset) {
        self.diameter_km = preset.diameter_km;
        self.velocity_km_s = preset.typical_velocity_km_s;
        self.density_kg_m3 = preset.composition().density_kg_m3();
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ("diameter_km", self.diameter_km),
            ("velocity_km_s", self.velocity_km_s),
            ("angle_degrees", self.angle_degrees),
            ("density_kg_m3", self.density_kg_m3),
        ];

        if let Some((name, value)) = fields.into_iter().find(|(_, value)| !(value.is_finite() && *value > 0.0)) {
            return Err(ParameterError::NotPositive { name, value });
        }

        if self.angle_degrees > 90.0 {
            return Err(ParameterError::AngleTooSteep(self.angle_degrees));
        }

        Ok(())
    }
}

impl Default for ImpactParameters {
    fn default() -> Self {
        ImpactParameters {
            diameter_km: 1.0,
            velocity_km_s: 20.0,
            angle_degrees: 45.0,
            density_kg_m3: 2700.0,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("impact angle must be at most 90 degrees, got {0}")]
    AngleTooSteep(f64),
}
