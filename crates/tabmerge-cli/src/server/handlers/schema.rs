//! Required column listing.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// One required column.
#[derive(Serialize)]
pub struct SchemaColumn {
    pub label: String,
    pub normalized: String,
}

/// GET /api/schema
pub async fn get_schema(State(state): State<AppState>) -> Json<Vec<SchemaColumn>> {
    let columns = state
        .merger
        .schema()
        .columns()
        .iter()
        .map(|c| SchemaColumn {
            label: c.label().to_string(),
            normalized: c.normalized().to_string(),
        })
        .collect();
    Json(columns)
}
