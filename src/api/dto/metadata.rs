//! DTOs for the metadata preview endpoint.

use serde::Deserialize;
use validator::Validate;

/// Query parameters for `GET /api/metadata`.
#[derive(Debug, Deserialize, Validate)]
pub struct MetadataQuery {
    #[validate(url(message = "invalid URL"))]
    pub url: String,
}
