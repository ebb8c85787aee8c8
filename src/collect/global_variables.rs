//! Policy constants for the analysis pipeline.
//!
//! These are tuning knobs, not derived values; tests assert on them
//! directly and operators can change them without touching control flow.

/// Satellite scene catalog queried for field imagery.
pub const SCENE_COLLECTION: &str = "COPERNICUS/S2";

/// Near-infrared band of the Sentinel-2 collection.
pub const NIR_BAND: &str = "B8";

/// Red band of the Sentinel-2 collection.
pub const RED_BAND: &str = "B4";

/// Key under which the backend reports the normalized-difference mean.
pub const MEAN_KEY: &str = "nd";

/// Scenes with cloud coverage at or above this percentage are rejected.
pub const DEFAULT_MAX_CLOUD_PERCENT: f64 = 20.0;

/// Ground sampling distance for the spatial reduction, meters per pixel.
pub const DEFAULT_SCALE_M: f64 = 10.0;

/// Upper bound on pixels considered during reduction, to bound backend cost
/// on very large polygons.
pub const DEFAULT_MAX_PIXELS: u64 = 1_000_000_000;

/// Length of the default scene search window.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// NDVI strictly above this value classifies as Healthy.
pub const HEALTHY_MIN_NDVI: f64 = 0.6;

/// NDVI strictly above this value (and at most `HEALTHY_MIN_NDVI`)
/// classifies as Moderate Stress; at or below is High Stress.
pub const MODERATE_MIN_NDVI: f64 = 0.3;

/// Decimal places kept when reporting the index value.
pub const REPORT_DECIMALS: u32 = 3;

/// Provenance tag attached to every successful report.
pub const NDVI_SOURCE: &str = "Sentinel-2 (Field NDVI)";

/// Environment variable holding the backend service-account credentials,
/// either as inline JSON or as a path to a key file.
pub const CREDENTIALS_ENV: &str = "FIELD_SENSING_CREDENTIALS";
