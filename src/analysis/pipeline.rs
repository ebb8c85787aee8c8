use std::time::{Duration, Instant};

use log::info;

use crate::analysis::health::classify;
use crate::analysis::ndvi::{aggregate_mean, request_index};
use crate::analysis::report::HealthReport;
use crate::analysis::scene::{select_scene, SceneQuery};
use crate::collect::global_variables::{DEFAULT_MAX_PIXELS, DEFAULT_SCALE_M, NDVI_SOURCE};
use crate::collect::sensing::backend::RemoteSensingBackend;
use crate::error::AnalysisError;
use crate::geo_core::FieldPolygon;

/// One field analysis request, validated and parameterized.
///
/// The stages run strictly sequentially — each backend query narrows the
/// next one — and every stage short-circuits with a typed error. Instances
/// share no mutable state, so independent analyses may run concurrently.
#[derive(Debug)]
pub struct FieldAnalysis {
    polygon: FieldPolygon,
    query: SceneQuery,
    scale_m: f64,
    max_pixels: u64,
    budget: Option<Duration>,
}

impl FieldAnalysis {
    /// Validate raw caller rings into an analysis with default policy:
    /// trailing-year window, 20% cloud ceiling, 10 m sampling scale.
    pub fn from_rings(rings: &[Vec<[f64; 2]>]) -> Result<Self, AnalysisError> {
        Ok(FieldAnalysis {
            polygon: FieldPolygon::from_rings(rings)?,
            query: SceneQuery::default(),
            scale_m: DEFAULT_SCALE_M,
            max_pixels: DEFAULT_MAX_PIXELS,
            budget: None,
        })
    }

    /// Override the scene search window and cloud ceiling.
    pub fn with_query(mut self, query: SceneQuery) -> Self {
        self.query = query;
        self
    }

    /// Override the reduction sampling scale (meters per pixel).
    pub fn with_scale(mut self, scale_m: f64) -> Self {
        self.scale_m = scale_m;
        self
    }

    /// Cap the overall wall-clock spent across backend calls. The budget is
    /// checked between stages; an in-flight call is abandoned once it
    /// returns, not actively cancelled.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn polygon(&self) -> &FieldPolygon {
        &self.polygon
    }

    /// Run the pipeline: select a scene, compute NDVI, reduce to a mean,
    /// classify, and assemble the report.
    pub fn run(&self, backend: &dyn RemoteSensingBackend) -> Result<HealthReport, AnalysisError> {
        let started = Instant::now();

        let scene = select_scene(backend, &self.polygon, &self.query)?;
        self.check_budget(started)?;

        let index = request_index(backend, &scene, &self.polygon)?;
        self.check_budget(started)?;

        let statistic = aggregate_mean(backend, &index, &self.polygon, self.scale_m, self.max_pixels)?;

        let band = classify(statistic.mean);
        let report = HealthReport::build(statistic.mean, band, NDVI_SOURCE);
        info!(
            "Field verdict: {} (ndvi {}, scene {})",
            report.status, report.ndvi, scene.id
        );
        Ok(report)
    }

    fn check_budget(&self, started: Instant) -> Result<(), AnalysisError> {
        match self.budget {
            Some(budget) if started.elapsed() > budget => Err(AnalysisError::BackendFailure(
                format!("analysis exceeded its {:?} wall-clock budget", budget),
            )),
            _ => Ok(()),
        }
    }
}
