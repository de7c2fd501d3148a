mod client;
mod domain;
mod http_backend;
mod impact_backend;

pub use client::{BackendClientError, new_client};
pub use domain::{ImpactRequest, ImpactResults};
pub use http_backend::HttpBackend;
pub use impact_backend::{BackendError, ImpactBackend};
