//! Landmark provider implementations.

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{AsyncHttpClient, ReqwestClient};
use super::types::{LandmarkProvider, LookupConfig, LookupError};
use crate::landmark::Landmark;
use crate::refresh::GeoPoint;

/// Body of a `/nearest` response.
#[derive(Debug, Deserialize)]
struct NearestResponse {
    results: Vec<Landmark>,
}

/// Drop landmarks with an unusable distance or bearing, normalizing the rest.
fn keep_valid(landmarks: Vec<Landmark>) -> Vec<Landmark> {
    landmarks
        .into_iter()
        .filter_map(|landmark| {
            let name = landmark.name.clone();
            match landmark.validated() {
                Ok(valid) => Some(valid),
                Err(e) => {
                    warn!(landmark = %name, error = %e, "Skipping invalid landmark");
                    None
                }
            }
        })
        .collect()
}

/// Landmark provider backed by the hills HTTP service.
///
/// Issues `GET {base_url}/nearest?latitude=..&longitude=..&furthest=..` and
/// decodes `{"results": [...]}`. Entries with an unusable distance or bearing
/// are dropped with a warning; the rest of the list is kept.
pub struct HttpLandmarkProvider<C: AsyncHttpClient = ReqwestClient> {
    client: C,
    config: LookupConfig,
}

impl HttpLandmarkProvider<ReqwestClient> {
    /// Create a provider with a reqwest client honoring `config.timeout`.
    pub fn from_config(config: LookupConfig) -> Result<Self, LookupError> {
        let client = ReqwestClient::new(config.timeout)?;
        Ok(Self::new(client, config))
    }
}

impl<C: AsyncHttpClient> HttpLandmarkProvider<C> {
    /// Create a provider with a custom HTTP client.
    pub fn new(client: C, config: LookupConfig) -> Self {
        Self { client, config }
    }

    /// Service configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn decode(body: &[u8]) -> Result<Vec<Landmark>, LookupError> {
        let response: NearestResponse =
            serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))?;

        let total = response.results.len();
        let landmarks = keep_valid(response.results);

        debug!(
            received = total,
            kept = landmarks.len(),
            "Decoded landmark response"
        );
        Ok(landmarks)
    }
}

impl<C: AsyncHttpClient> LandmarkProvider for HttpLandmarkProvider<C> {
    fn name(&self) -> &str {
        "hills-http"
    }

    fn lookup(&self, position: GeoPoint) -> BoxFuture<'_, Result<Vec<Landmark>, LookupError>> {
        Box::pin(async move {
            let url = self.config.nearest_url(&position);
            debug!(url = %url, "Querying landmark service");
            let body = self.client.get(&url).await?;
            Self::decode(&body)
        })
    }
}

/// Provider returning a fixed landmark list regardless of position.
///
/// Used for offline runs and tests. Invalid entries are dropped on
/// construction, as they are from service responses.
#[derive(Debug, Clone, Default)]
pub struct StaticLandmarkProvider {
    landmarks: Vec<Landmark>,
}

impl StaticLandmarkProvider {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            landmarks: keep_valid(landmarks),
        }
    }
}

impl LandmarkProvider for StaticLandmarkProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn lookup(&self, _position: GeoPoint) -> BoxFuture<'_, Result<Vec<Landmark>, LookupError>> {
        let landmarks = self.landmarks.clone();
        Box::pin(async move { Ok(landmarks) })
    }
}
