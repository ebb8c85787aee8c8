use serde::Serialize;
use thiserror::Error;

/// Terminal failure of one pipeline stage.
///
/// The four kinds carry different remediation advice for the caller:
/// `InvalidPolygon` means the drawn field must be fixed, `NoImageryFound`
/// means the date window or cloud ceiling should be widened,
/// `StatisticUnavailable` means the scene had no valid pixels under the
/// polygon, and `BackendFailure` covers transport/auth/quota faults that are
/// retryable after backoff. No stage retries automatically.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),
    #[error("no imagery found: {0}")]
    NoImageryFound(String),
    #[error("statistic unavailable: {0}")]
    StatisticUnavailable(String),
    #[error("backend failure: {0}")]
    BackendFailure(String),
}

impl AnalysisError {
    /// Stable machine-readable kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidPolygon(_) => "InvalidPolygon",
            AnalysisError::NoImageryFound(_) => "NoImageryFound",
            AnalysisError::StatisticUnavailable(_) => "StatisticUnavailable",
            AnalysisError::BackendFailure(_) => "BackendFailure",
        }
    }

    /// HTTP-style status code for the caller-facing boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            AnalysisError::InvalidPolygon(_) => 400,
            AnalysisError::NoImageryFound(_) => 404,
            AnalysisError::StatisticUnavailable(_) => 500,
            AnalysisError::BackendFailure(_) => 500,
        }
    }

    /// Stable user-facing message. Raw backend text is never the primary
    /// message; it travels separately as diagnostic detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::InvalidPolygon(_) => "A valid field polygon is required",
            AnalysisError::NoImageryFound(_) => {
                "No satellite images found for this area and date range"
            }
            AnalysisError::StatisticUnavailable(_) => "Could not calculate NDVI for this area",
            AnalysisError::BackendFailure(_) => "Satellite imagery service request failed",
        }
    }

    /// Inner detail string, whatever the kind.
    pub fn detail(&self) -> &str {
        match self {
            AnalysisError::InvalidPolygon(detail)
            | AnalysisError::NoImageryFound(detail)
            | AnalysisError::StatisticUnavailable(detail)
            | AnalysisError::BackendFailure(detail) => detail,
        }
    }

    /// Build the failure response body for the caller-facing boundary.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.user_message().to_string(),
            details: Some(self.detail().to_string()),
        }
    }
}

/// Failure response shape: `{ error, details? }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
