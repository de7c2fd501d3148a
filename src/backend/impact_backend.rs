use crate::asteroid::AsteroidPreset;
use crate::backend::{ImpactRequest, ImpactResults};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

/// The remote service that knows the asteroids and runs the impact physics.
#[async_trait]
pub trait ImpactBackend: Debug + Send + Sync {
    async fn asteroid_gallery(&self) -> Result<Vec<AsteroidPreset>, BackendError>;

    async fn calculate_impact(&self, request: &ImpactRequest) -> Result<ImpactResults, BackendError>;
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("could not reach the simulation backend: {0}")]
    Network(#[from] reqwest::Error),
    #[error("simulation backend responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("simulation backend sent a malformed response: {0}")]
    MalformedResponse(String),
}
