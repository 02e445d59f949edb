//! Merged table download handler.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tabmerge::{table_to_bytes, OutputFormat};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for a download.
#[derive(Deserialize)]
pub struct DownloadQuery {
    /// Output format name; defaults to csv.
    pub format: Option<String>,
}

/// GET /api/merged/:id
pub async fn download_merged(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let format: OutputFormat = match query.format.as_deref() {
        Some(name) => name.parse().map_err(ApiError::BadRequest)?,
        None => OutputFormat::default(),
    };

    let table = state
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No merged result with id {}", id)))?;

    let body = table_to_bytes(&table, format)?;
    let disposition = format!("attachment; filename=\"{}\"", format.default_file_name());

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
