use serde::Deserialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Deserialize)]
pub struct ImpactResponse {
    pub impact_results: ImpactResults,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct ImpactResults {
    pub calculated_energy_megatons_tnt: f64,
    pub estimated_crater_diameter_km: f64,
    pub estimated_equivalent_magnitude: f64,
    pub damage_description: String,
}

impl ImpactResults {
    pub fn report_lines(&self) -> [String; 4] {
        [
            format!("Energy Release: {:.2} MT", self.calculated_energy_megatons_tnt),
            format!("Crater Diameter: {:.2} km", self.estimated_crater_diameter_km),
            format!("Seismic Magnitude: M {:.2}", self.estimated_equivalent_magnitude),
            format!("Assessment: {}", self.damage_description),
        ]
    }
}

impl Display for ImpactResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.report_lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_renders_the_report() {
        let results = ImpactResults {
            calculated_energy_megatons_tnt: 1234.567,
            estimated_crater_diameter_km: 12.0,
            estimated_equivalent_magnitude: 7.456,
            damage_description: "Regional devastation with potential climate effects.".to_string(),
        };

        assert_eq!(
            results.to_string(),
            "Energy Release: 1234.57 MT\n\
             Crater Diameter: 12.00 km\n\
             Seismic Magnitude: M 7.46\n\
             Assessment: Regional devastation with potential climate effects."
        );
    }
}
