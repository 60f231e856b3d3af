//! Serves stored objects directly, for deployments on the local provider
//! where no CDN or bucket URL exists.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /files/{*key}
pub async fn serve_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let meta = state.storage.metadata(&key).await?;
    let stream = state.storage.read(&key).await?;

    let mime = meta
        .mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, mime),
            (header::CONTENT_LENGTH, meta.size_bytes.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
