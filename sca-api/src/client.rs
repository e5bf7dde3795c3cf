use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, Result, GENERIC_FAILURE_MESSAGE};
use crate::wire::{AnalysisRequest, AnalysisResponse, ErrorBody};

/// Default endpoint of the analysis service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/snow-data";

/// Transport seam for issuing one analysis request.
///
/// The production implementation is `AnalysisClient`; tests and alternative
/// hosts provide their own. Implementations must return `ApiError::Cancelled`
/// once the token is cancelled, without waiting for the remote side.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisResponse>;
}

/// HTTP client for the analysis service.
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Result<AnalysisClient> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(AnalysisClient {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        info!(
            "POST {} ({} to {})",
            self.endpoint, request.start_date, request.end_date
        );
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Analysis service returned {} for {}", status, self.endpoint);
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    /// Issue one POST, racing it against the cancellation token. A cancelled
    /// token wins immediately; the in-flight HTTP future is dropped.
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisResponse> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Analysis request aborted by caller");
                Err(ApiError::Cancelled)
            }
            outcome = self.send(request) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisBackend, AnalysisClient};
    use crate::error::ApiError;
    use crate::wire::AnalysisRequest;
    use sca_geo::month_range::{MonthRange, YearMonth};
    use sca_geo::polygon::{LatLng, Polygon};
    use tokio_util::sync::CancellationToken;

    fn request() -> AnalysisRequest {
        let polygon = Polygon::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(1.0, 1.0),
        ])
        .unwrap();
        let range = MonthRange::new(YearMonth::new(2020, 1), YearMonth::new(2020, 1)).unwrap();
        AnalysisRequest::new(&polygon, &range)
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_short_circuits() {
        // No listener on this port; a cancelled token must win before any
        // connection attempt is made.
        let client = AnalysisClient::new("http://127.0.0.1:9/snow-data").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = client.analyze(&request(), cancel).await;
        assert!(matches!(outcome, Err(ApiError::Cancelled)));
    }
}
