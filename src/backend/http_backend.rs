use crate::asteroid::AsteroidPreset;
use crate::backend::domain::{GalleryResponse, ImpactResponse};
use crate::backend::{BackendError, ImpactBackend, ImpactRequest, ImpactResults};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

/// Talks to the simulation backend over HTTP and validates its JSON at the boundary.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend { client, base_url }
    }
}

#[async_trait]
impl ImpactBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn asteroid_gallery(&self) -> Result<Vec<AsteroidPreset>, BackendError> {
        info!("Retrieving asteroid gallery...");

        let response = self.client.get(format!("{}/asteroid_gallery", self.base_url)).send().await?;
        let gallery = parse::<GalleryResponse>(response).await?;

        info!("Retrieving asteroid gallery... OK, {} found", gallery.asteroids.len());
        Ok(gallery.asteroids)
    }

    #[instrument(skip(self), fields(lat = request.impact_lat, lng = request.impact_lng))]
    async fn calculate_impact(&self, request: &ImpactRequest) -> Result<ImpactResults, BackendError> {
        info!("Calculating impact...");

        let response = self
            .client
            .post(format!("{}/calculate_impact", self.base_url))
            .json(request)
            .send()
            .await?;
        let results = parse::<ImpactResponse>(response).await?.impact_results;

        let crater = results.estimated_crater_diameter_km;
        if !(crater.is_finite() && crater >= 0.0) {
            return Err(BackendError::MalformedResponse(format!("invalid crater diameter: {}", crater)));
        }

        info!("Calculating impact... OK");
        Ok(results)
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(status_code = %status, "⚠️ Request to the simulation backend failed. Response: {:?}", body);
        return Err(BackendError::Status { status, body });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}
