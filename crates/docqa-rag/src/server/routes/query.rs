//! Chat endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /chat - Answer a question from the indexed documents
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();
    let Json(request) = payload?;
    let question = request
        .question()
        .ok_or_else(|| Error::validation("No query provided"))?;

    tracing::info!("Query: \"{}\"", question);

    let outcome = state.engine().query(question, request.top_k).await?;

    Ok(Json(ChatResponse {
        answer: outcome.answer,
        chunks_used: outcome.results.len(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
