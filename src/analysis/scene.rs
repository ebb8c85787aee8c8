use anyhow::{ensure, Result};
use chrono::{Duration, NaiveDate, Utc};
use log::{debug, info};

use crate::collect::global_variables::{DEFAULT_MAX_CLOUD_PERCENT, DEFAULT_WINDOW_DAYS};
use crate::collect::sensing::backend::{RemoteSensingBackend, SceneCandidate};
use crate::error::AnalysisError;
use crate::geo_core::FieldPolygon;

/// Inclusive date window for the scene search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl TimeWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        ensure!(from <= to, "window start {} is after end {}", from, to);
        Ok(TimeWindow { from, to })
    }

    /// Default search window: the trailing year ending today.
    pub fn trailing_year() -> Self {
        let to = Utc::now().date_naive();
        TimeWindow {
            from: to - Duration::days(DEFAULT_WINDOW_DAYS),
            to,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }
}

/// Scene search parameters: date window plus cloud ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneQuery {
    window: TimeWindow,
    max_cloud_percent: f64,
}

impl SceneQuery {
    pub fn new(window: TimeWindow, max_cloud_percent: f64) -> Result<Self> {
        ensure!(
            (0.0..=100.0).contains(&max_cloud_percent),
            "cloud ceiling {} is outside [0, 100]",
            max_cloud_percent
        );
        Ok(SceneQuery {
            window,
            max_cloud_percent,
        })
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn max_cloud_percent(&self) -> f64 {
        self.max_cloud_percent
    }
}

impl Default for SceneQuery {
    fn default() -> Self {
        SceneQuery {
            window: TimeWindow::trailing_year(),
            max_cloud_percent: DEFAULT_MAX_CLOUD_PERCENT,
        }
    }
}

/// Pick one scene for the field, deterministically.
///
/// Queries the backend for candidates under the cloud ceiling and keeps the
/// one with the lowest reported cloud coverage; ties go to the candidate the
/// backend returned first. An empty candidate list is `NoImageryFound` —
/// distinct from a scene whose later reduction yields no data, because the
/// remediation differs (widen the window vs. redraw the polygon).
pub fn select_scene(
    backend: &dyn RemoteSensingBackend,
    polygon: &FieldPolygon,
    query: &SceneQuery,
) -> Result<SceneCandidate, AnalysisError> {
    let candidates = backend
        .find_scenes(polygon, query)
        .map_err(|e| AnalysisError::BackendFailure(format!("scene search failed: {:#}", e)))?;

    debug!(
        "{} candidate scene(s) under {}% cloud between {} and {}",
        candidates.len(),
        query.max_cloud_percent,
        query.window.start(),
        query.window.end()
    );

    let mut best: Option<SceneCandidate> = None;
    for candidate in candidates {
        let replace = match &best {
            Some(current) => candidate.cloud_percent < current.cloud_percent,
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }

    match best {
        Some(scene) => {
            info!("Selected scene {} ({}% cloud)", scene.id, scene.cloud_percent);
            Ok(scene)
        }
        None => Err(AnalysisError::NoImageryFound(format!(
            "no scenes intersect the field between {} and {} under {}% cloud",
            query.window.start(),
            query.window.end(),
            query.max_cloud_percent
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::collect::sensing::backend::{BandPair, IndexHandle};

    struct FixedScenes(Vec<SceneCandidate>);

    impl RemoteSensingBackend for FixedScenes {
        fn find_scenes(
            &self,
            _footprint: &FieldPolygon,
            _query: &SceneQuery,
        ) -> anyhow::Result<Vec<SceneCandidate>> {
            Ok(self.0.clone())
        }

        fn compute_band_index(
            &self,
            _scene: &SceneCandidate,
            _bands: BandPair,
            _footprint: &FieldPolygon,
        ) -> anyhow::Result<IndexHandle> {
            unreachable!("selection tests never compute an index")
        }

        fn reduce_region(
            &self,
            _index: &IndexHandle,
            _footprint: &FieldPolygon,
            _scale_m: f64,
            _max_pixels: u64,
        ) -> anyhow::Result<HashMap<String, f64>> {
            unreachable!("selection tests never reduce")
        }
    }

    struct FailingBackend;

    impl RemoteSensingBackend for FailingBackend {
        fn find_scenes(
            &self,
            _footprint: &FieldPolygon,
            _query: &SceneQuery,
        ) -> anyhow::Result<Vec<SceneCandidate>> {
            anyhow::bail!("connection refused")
        }

        fn compute_band_index(
            &self,
            _scene: &SceneCandidate,
            _bands: BandPair,
            _footprint: &FieldPolygon,
        ) -> anyhow::Result<IndexHandle> {
            anyhow::bail!("connection refused")
        }

        fn reduce_region(
            &self,
            _index: &IndexHandle,
            _footprint: &FieldPolygon,
            _scale_m: f64,
            _max_pixels: u64,
        ) -> anyhow::Result<HashMap<String, f64>> {
            anyhow::bail!("connection refused")
        }
    }

    fn field() -> FieldPolygon {
        FieldPolygon::from_rings(&[vec![
            [-1.0, 46.0],
            [-0.9, 46.0],
            [-0.9, 46.1],
            [-1.0, 46.0],
        ]])
        .unwrap()
    }

    fn scene(id: &str, cloud: f64) -> SceneCandidate {
        SceneCandidate {
            id: id.to_string(),
            cloud_percent: cloud,
        }
    }

    #[test]
    fn test_window_rejects_inverted_dates() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(TimeWindow::new(from, to).is_err());
    }

    #[test]
    fn test_query_rejects_out_of_range_ceiling() {
        let window = TimeWindow::trailing_year();
        assert!(SceneQuery::new(window, 150.0).is_err());
        assert!(SceneQuery::new(window, -1.0).is_err());
        assert!(SceneQuery::new(window, 0.0).is_ok());
    }

    #[test]
    fn test_default_query_uses_policy_ceiling() {
        assert_eq!(SceneQuery::default().max_cloud_percent(), 20.0);
    }

    #[test]
    fn test_zero_candidates_is_no_imagery_found() {
        let backend = FixedScenes(vec![]);
        let err = select_scene(&backend, &field(), &SceneQuery::default()).unwrap_err();
        assert_eq!(err.kind(), "NoImageryFound");
    }

    #[test]
    fn test_picks_lowest_cloud_coverage() {
        let backend = FixedScenes(vec![scene("a", 5.0), scene("b", 2.0), scene("c", 12.0)]);
        let chosen = select_scene(&backend, &field(), &SceneQuery::default()).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_ties_go_to_first_returned() {
        let backend = FixedScenes(vec![scene("first", 5.0), scene("second", 5.0)]);
        let chosen = select_scene(&backend, &field(), &SceneQuery::default()).unwrap();
        assert_eq!(chosen.id, "first");
    }

    #[test]
    fn test_transport_fault_is_backend_failure() {
        let err = select_scene(&FailingBackend, &field(), &SceneQuery::default()).unwrap_err();
        assert_eq!(err.kind(), "BackendFailure");
        assert!(err.detail().contains("connection refused"));
    }
}
