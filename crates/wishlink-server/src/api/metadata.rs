use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use wishlink_core::UrlMetadata;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct MetadataRequest {
    #[serde(default)]
    url: String,
}

/// POST /api/v1/metadata: extract wishlist metadata for a product link.
///
/// Any URL that passes validation gets a 200; extraction failures show up
/// as null fields in `data`, never as an error status.
pub(super) async fn fetch_metadata(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<MetadataRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UrlMetadata>>, ApiError> {
    let rid = &req_id.0;

    let Json(body) = body.map_err(|e| ApiError::new(rid, "bad_request", e.body_text()))?;

    let url = body.url.trim();
    if url.is_empty() {
        return Err(ApiError::new(rid, "validation_error", "url is required"));
    }

    let metadata = state.fetcher.fetch_url_metadata(url).await;
    tracing::info!(
        request_id = %rid,
        url,
        resolved = %metadata.url,
        bare = metadata.is_bare(),
        "metadata request served"
    );

    Ok(Json(ApiResponse {
        data: metadata,
        meta: ResponseMeta::new(req_id.0),
    }))
}
