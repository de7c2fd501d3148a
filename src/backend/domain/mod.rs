mod gallery_response;
mod impact_request;
mod impact_response;

pub use gallery_response::GalleryResponse;
pub use impact_request::ImpactRequest;
pub use impact_response::{ImpactResponse, ImpactResults};
