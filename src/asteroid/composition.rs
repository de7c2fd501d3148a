use std::fmt::{Display, Formatter};

/// Bulk composition of an asteroid, as reported by the gallery.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Composition {
    Stony,
    StonyIron,
    Iron,
    Carbonaceous,
    StonyMetallic,
    IceRich,
    RockIce,
    Unknown,
}

impl Composition {
    /// Matches case-insensitively; anything unrecognized is [`Composition::Unknown`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "stony" => Composition::Stony,
            "stony-iron" => Composition::StonyIron,
            "iron" => Composition::Iron,
            "carbonaceous" => Composition::Carbonaceous,
            "stony-metallic" => Composition::StonyMetallic,
            "ice-rich" => Composition::IceRich,
            "rock-ice" => Composition::RockIce,
            _ => Composition::Unknown,
        }
    }

    /// Bulk density in kg/m³. Unknown compositions are treated as stony.
    pub fn density_kg_m3(self) -> f64 {
        match self {
            Composition::Stony | Composition::Unknown => 2700.0,
            Composition::StonyIron | Composition::StonyMetallic => 5000.0,
            Composition::Iron => 7800.0,
            Composition::Carbonaceous => 1400.0,
            Composition::IceRich => 900.0,
            Composition::RockIce => 1500.0,
        }
    }
}

impl Display for Composition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Composition::Stony => "stony",
            Composition::StonyIron => "stony-iron",
            Composition::Iron => "iron",
            Composition::Carbonaceous => "carbonaceous",
            Composition::StonyMetallic => "stony-metallic",
            Composition::IceRich => "ice-rich",
            Composition::RockIce => "rock-ice",
            Composition::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
