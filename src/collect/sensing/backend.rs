use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::analysis::scene::SceneQuery;
use crate::collect::global_variables::{NIR_BAND, RED_BAND};
use crate::geo_core::FieldPolygon;

/// One satellite capture intersecting the field, as reported by the backend.
/// An opaque handle plus its cloud score; raw pixels are never inspected
/// on this side of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCandidate {
    pub id: String,
    pub cloud_percent: f64,
}

/// Handle to a per-pixel index the backend has computed for one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexHandle {
    pub id: String,
}

/// The band pairing a normalized difference is computed from.
///
/// Downstream thresholds are calibrated against this exact NIR/red pairing;
/// substituting another pairing changes the meaning of every classification
/// threshold and must be an explicit, versioned decision.
#[derive(Debug, Clone, Copy)]
pub struct BandPair {
    pub nir: &'static str,
    pub red: &'static str,
}

impl BandPair {
    /// The fixed Sentinel-2 NDVI pairing (B8, B4).
    pub fn ndvi() -> Self {
        BandPair {
            nir: NIR_BAND,
            red: RED_BAND,
        }
    }
}

/// Query/response contract with the remote sensing compute service.
///
/// Three idempotent operations, each a single request/response suspension
/// point with one success or one failure outcome; no partial or streamed
/// results. Errors are raw transport/backend faults; the pipeline maps them
/// into its typed taxonomy at each stage boundary.
pub trait RemoteSensingBackend {
    /// Scenes intersecting the footprint within the query window, filtered
    /// by the cloud ceiling and ordered by ascending cloud coverage.
    fn find_scenes(
        &self,
        footprint: &FieldPolygon,
        query: &SceneQuery,
    ) -> Result<Vec<SceneCandidate>>;

    /// Ask the backend to compute `(bandA - bandB) / (bandA + bandB)`
    /// per pixel for one scene, restricted to the footprint.
    fn compute_band_index(
        &self,
        scene: &SceneCandidate,
        bands: BandPair,
        footprint: &FieldPolygon,
    ) -> Result<IndexHandle>;

    /// Spatial mean reduction of a computed index over the footprint.
    /// The returned map may lack the mean key when the polygon has no valid
    /// pixels in the scene; absence is meaningful and must be preserved.
    fn reduce_region(
        &self,
        index: &IndexHandle,
        footprint: &FieldPolygon,
        scale_m: f64,
        max_pixels: u64,
    ) -> Result<HashMap<String, f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndvi_band_pair() {
        let bands = BandPair::ndvi();
        assert_eq!(bands.nir, "B8");
        assert_eq!(bands.red, "B4");
    }
}
