//! Document listing endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{DocumentListResponse, DocumentSummary};

/// GET /api/documents - List indexed documents in insertion order
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    let documents: Vec<DocumentSummary> = state
        .engine()
        .store()
        .snapshot_all()
        .iter()
        .map(|(_, entry)| DocumentSummary::from(entry.as_ref()))
        .collect();
    let total_chunks = documents.iter().map(|d| d.chunks).sum();

    Json(DocumentListResponse {
        total_count: documents.len(),
        total_chunks,
        documents,
    })
}

/// GET /api/documents/:id - Get a single document summary
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentSummary>> {
    let entry = state
        .engine()
        .store()
        .get(&id)
        .ok_or(Error::DocumentNotFound(id))?;

    Ok(Json(DocumentSummary::from(entry.as_ref())))
}
