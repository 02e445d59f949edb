//! Archive upload and merge handler.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tabmerge::{FileReport, MergeSummary};
use tracing::{debug, info};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Preview of the merged table.
#[derive(Serialize)]
pub struct PreviewTable {
    /// Canonical column headers.
    pub headers: Vec<String>,
    /// First rows of the merged table.
    pub rows: Vec<Vec<String>>,
    /// Total row count of the merged table.
    pub total_rows: usize,
    /// Whether the preview was truncated.
    pub truncated: bool,
}

/// Response for an uploaded archive.
#[derive(Serialize)]
pub struct MergeResponse {
    /// Id for `/api/merged/:id`; absent when nothing merged.
    pub id: Option<String>,
    /// Archive entries skipped as unsupported.
    pub skipped: Vec<String>,
    /// One entry per supported file.
    pub files: Vec<FileReport>,
    pub summary: MergeSummary,
    /// Headline for the user.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewTable>,
}

/// POST /api/merge
///
/// The request body is the raw ZIP archive.
pub async fn merge_archive(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MergeResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Please upload a ZIP file".to_string()));
    }

    info!(bytes = body.len(), "received archive");

    let merger = state.merger.clone();
    let result = tokio::task::spawn_blocking(move || merger.merge_archive_bytes(&body))
        .await
        .map_err(|e| ApiError::Internal(format!("Merge task failed: {}", e)))??;

    let preview_rows = state.merger.config().preview_rows;
    let summary = result.report.summary.clone();
    let files = result.report.files.clone();

    let (id, preview, message) = match result.report.merged {
        Some(table) => {
            let preview = PreviewTable {
                headers: table.headers.clone(),
                rows: table.rows.iter().take(preview_rows).cloned().collect(),
                total_rows: table.row_count(),
                truncated: table.row_count() > preview_rows,
            };
            let id = state.store(table).await;
            let stored = state.stored().await;
            debug!(%id, stored, "stored merged table");
            let message = format!(
                "Merged {} files into {} rows",
                summary.merged_files, summary.merged_rows
            );
            (Some(id), Some(preview), message)
        }
        None if files.is_empty() => (None, None, "No valid CSV/Excel files found".to_string()),
        None => (
            None,
            None,
            "No files with complete columns to merge.".to_string(),
        ),
    };

    Ok(Json(MergeResponse {
        id,
        skipped: result.skipped,
        files,
        summary,
        message,
        preview,
    }))
}
