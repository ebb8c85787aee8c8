use serde::Serialize;

use crate::analysis::health::HealthBand;
use crate::collect::global_variables::REPORT_DECIMALS;
use crate::commons::basic_functions::round_to;

/// Final vegetation health verdict for one field.
///
/// Serializes to the caller-facing shape
/// `{ ndvi, status: "Healthy" | "Moderate Stress" | "High Stress", source }`.
/// Immutable once built; the unrounded index stays available for consumers
/// that need more precision than the display value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Mean NDVI rounded for display stability.
    pub ndvi: f64,
    pub status: HealthBand,
    /// Data provenance tag, e.g. "Sentinel-2 (Field NDVI)".
    pub source: String,
    #[serde(skip)]
    raw_index: f64,
}

impl HealthReport {
    pub fn build(raw_index: f64, status: HealthBand, source: &str) -> Self {
        HealthReport {
            ndvi: round_to(raw_index, REPORT_DECIMALS),
            status,
            source: source.to_string(),
            raw_index,
        }
    }

    /// The mean NDVI before display rounding.
    pub fn raw_index(&self) -> f64 {
        self.raw_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rounds_for_display_and_keeps_raw() {
        let report = HealthReport::build(0.71962, HealthBand::Healthy, "Sentinel-2 (Field NDVI)");
        assert_eq!(report.ndvi, 0.72);
        assert_eq!(report.raw_index(), 0.71962);
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = HealthReport::build(0.4519, HealthBand::ModerateStress, "Sentinel-2 (Field NDVI)");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ndvi"], 0.452);
        assert_eq!(json["status"], "Moderate Stress");
        assert_eq!(json["source"], "Sentinel-2 (Field NDVI)");
        assert!(json.get("raw_index").is_none());
    }
}
