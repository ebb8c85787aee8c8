use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collect::global_variables::{HEALTHY_MIN_NDVI, MODERATE_MIN_NDVI};

/// Discrete vegetation health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Healthy,
    #[serde(rename = "Moderate Stress")]
    ModerateStress,
    #[serde(rename = "High Stress")]
    HighStress,
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthBand::Healthy => "Healthy",
            HealthBand::ModerateStress => "Moderate Stress",
            HealthBand::HighStress => "High Stress",
        };
        f.write_str(label)
    }
}

/// Map a mean NDVI to a health band. Total and deterministic.
///
/// Boundary values fall to the lower band: exactly 0.6 is Moderate Stress,
/// exactly 0.3 is High Stress. Prior reports were produced with these exact
/// comparisons, so they must not drift.
pub fn classify(value: f64) -> HealthBand {
    if value > HEALTHY_MIN_NDVI {
        HealthBand::Healthy
    } else if value > MODERATE_MIN_NDVI {
        HealthBand::ModerateStress
    } else {
        HealthBand::HighStress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_bands() {
        assert_eq!(classify(0.61), HealthBand::Healthy);
        assert_eq!(classify(0.60), HealthBand::ModerateStress);
        assert_eq!(classify(0.31), HealthBand::ModerateStress);
        assert_eq!(classify(0.30), HealthBand::HighStress);
        assert_eq!(classify(-0.2), HealthBand::HighStress);
    }

    #[test]
    fn test_threshold_constants() {
        assert_eq!(HEALTHY_MIN_NDVI, 0.6);
        assert_eq!(MODERATE_MIN_NDVI, 0.3);
    }

    #[test]
    fn test_band_display_labels() {
        assert_eq!(HealthBand::Healthy.to_string(), "Healthy");
        assert_eq!(HealthBand::ModerateStress.to_string(), "Moderate Stress");
        assert_eq!(HealthBand::HighStress.to_string(), "High Stress");
    }

    #[test]
    fn test_band_serializes_with_spaces() {
        let json = serde_json::to_string(&HealthBand::ModerateStress).unwrap();
        assert_eq!(json, "\"Moderate Stress\"");
    }
}
