use log::debug;

use crate::collect::global_variables::MEAN_KEY;
use crate::collect::sensing::backend::{
    BandPair, IndexHandle, RemoteSensingBackend, SceneCandidate,
};
use crate::error::AnalysisError;
use crate::geo_core::FieldPolygon;

/// Spatial mean of the index over the field footprint.
/// Only ever built from a present numeric mean; "no valid pixels" is an
/// error state (`StatisticUnavailable`), never a zero here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStatistic {
    pub mean: f64,
    pub scale_m: f64,
}

/// Ask the backend for a per-pixel NDVI over the scene, scoped to the field.
///
/// No numeric work happens locally; this seam exists because every
/// downstream threshold assumes this exact band pairing.
pub fn request_index(
    backend: &dyn RemoteSensingBackend,
    scene: &SceneCandidate,
    polygon: &FieldPolygon,
) -> Result<IndexHandle, AnalysisError> {
    backend
        .compute_band_index(scene, BandPair::ndvi(), polygon)
        .map_err(|e| {
            AnalysisError::BackendFailure(format!(
                "index computation for scene {} failed: {:#}",
                scene.id, e
            ))
        })
}

/// Reduce the computed index to a single mean over the polygon.
///
/// A missing mean key means the polygon had no valid pixels in this scene
/// (fully cloud-masked, or outside the scene extent) and surfaces as
/// `StatisticUnavailable`. A mean of exactly 0.0 is a valid statistic.
pub fn aggregate_mean(
    backend: &dyn RemoteSensingBackend,
    index: &IndexHandle,
    polygon: &FieldPolygon,
    scale_m: f64,
    max_pixels: u64,
) -> Result<RegionStatistic, AnalysisError> {
    let results = backend
        .reduce_region(index, polygon, scale_m, max_pixels)
        .map_err(|e| AnalysisError::BackendFailure(format!("region reduction failed: {:#}", e)))?;

    match results.get(MEAN_KEY) {
        Some(&mean) => {
            debug!("Mean NDVI {} at {} m/pixel", mean, scale_m);
            Ok(RegionStatistic { mean, scale_m })
        }
        None => Err(AnalysisError::StatisticUnavailable(format!(
            "reduction returned no '{}' value; the polygon has no valid pixels in this scene",
            MEAN_KEY
        ))),
    }
}
