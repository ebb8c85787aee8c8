use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::analysis::scene::SceneQuery;
use crate::collect::global_variables::SCENE_COLLECTION;
use crate::collect::sensing::auth::SensingAuth;
use crate::collect::sensing::backend::{
    BandPair, IndexHandle, RemoteSensingBackend, SceneCandidate,
};
use crate::geo_core::FieldPolygon;

/// Default per-request timeout for backend calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the remote sensing compute service.
///
/// Speaks the three-operation query contract over JSON. Authentication is a
/// process-lifetime precondition handled by [`SensingAuth`]; constructing a
/// client triggers it if it has not happened yet.
pub struct SensingApiClient {
    base_url: Url,
    http: Client,
    auth: &'static SensingAuth,
}

impl SensingApiClient {
    /// Connect with the default request timeout.
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::connect_with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Connect with an explicit per-request timeout. On expiry the call in
    /// flight is abandoned and surfaces as a request error; nothing is
    /// actively cancelled on the backend.
    pub fn connect_with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid sensing backend URL: {}", base_url))?;
        // Url::join treats a path without a trailing slash as a file.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for sensing backend")?;

        let token_url = base_url
            .join("auth/token")
            .context("Failed to build token endpoint URL")?;
        let auth = SensingAuth::initialize(&http, token_url.as_str())?;

        Ok(SensingApiClient {
            base_url,
            http,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("Failed to build request URL for {}", path))?;

        debug!("POST {}", url);

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(self.auth.access_token())
            .json(body)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("Sensing backend returned {}: {}", status, body);
        }

        response
            .json()
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

#[derive(Serialize)]
struct SceneSearchRequest<'a> {
    collection: &'a str,
    footprint: geojson::Geometry,
    date_from: NaiveDate,
    date_to: NaiveDate,
    max_cloud_percent: f64,
}

#[derive(Deserialize)]
struct SceneSearchResponse {
    scenes: Vec<SceneCandidate>,
}

#[derive(Serialize)]
struct BandIndexRequest<'a> {
    scene_id: &'a str,
    band_a: &'a str,
    band_b: &'a str,
    footprint: geojson::Geometry,
}

#[derive(Deserialize)]
struct BandIndexResponse {
    index_id: String,
}

#[derive(Serialize)]
struct ReduceRequest<'a> {
    index_id: &'a str,
    footprint: geojson::Geometry,
    reducer: &'a str,
    scale_m: f64,
    max_pixels: u64,
}

#[derive(Deserialize)]
struct ReduceResponse {
    results: HashMap<String, f64>,
}

impl RemoteSensingBackend for SensingApiClient {
    fn find_scenes(
        &self,
        footprint: &FieldPolygon,
        query: &SceneQuery,
    ) -> Result<Vec<SceneCandidate>> {
        let request = SceneSearchRequest {
            collection: SCENE_COLLECTION,
            footprint: footprint.to_geojson(),
            date_from: query.window().start(),
            date_to: query.window().end(),
            max_cloud_percent: query.max_cloud_percent(),
        };
        let response: SceneSearchResponse = self.post_json("scenes/search", &request)?;
        Ok(response.scenes)
    }

    fn compute_band_index(
        &self,
        scene: &SceneCandidate,
        bands: BandPair,
        footprint: &FieldPolygon,
    ) -> Result<IndexHandle> {
        let request = BandIndexRequest {
            scene_id: &scene.id,
            band_a: bands.nir,
            band_b: bands.red,
            footprint: footprint.to_geojson(),
        };
        let response: BandIndexResponse =
            self.post_json("indices/normalized-difference", &request)?;
        Ok(IndexHandle {
            id: response.index_id,
        })
    }

    fn reduce_region(
        &self,
        index: &IndexHandle,
        footprint: &FieldPolygon,
        scale_m: f64,
        max_pixels: u64,
    ) -> Result<HashMap<String, f64>> {
        let request = ReduceRequest {
            index_id: &index.id,
            footprint: footprint.to_geojson(),
            reducer: "mean",
            scale_m,
            max_pixels,
        };
        let response: ReduceResponse = self.post_json("reduce", &request)?;
        Ok(response.results)
    }
}
