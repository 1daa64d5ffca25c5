//! Document ingestion endpoints: file upload and web page processing

use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::ingestion::FileParser;
use crate::server::state::AppState;
use crate::types::{DocumentSource, IngestResponse, UrlRequest};

/// POST /upload - Upload a txt/pdf/docx file and index its text
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();
    let mut multipart = multipart?;
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| Error::validation("No file part in the request"))?;
    if filename.is_empty() {
        return Err(Error::validation("No file selected"));
    }

    let upload_config = &state.config().upload;
    if !upload_config.is_allowed(&filename) {
        return Err(Error::validation(format!(
            "File type not allowed: {} (accepted: {})",
            filename,
            upload_config.allowed_extensions.join(", ")
        )));
    }

    let safe_name = secure_filename(&filename)?;
    if safe_name.is_empty() {
        return Err(Error::validation(format!("Invalid filename: {}", filename)));
    }

    tracing::info!("Processing upload: {} ({} bytes)", safe_name, data.len());

    tokio::fs::create_dir_all(&upload_config.upload_dir).await?;
    let path = upload_config.upload_dir.join(&safe_name);
    tokio::fs::write(&path, &data).await?;

    let parse_name = safe_name.clone();
    let text = tokio::task::spawn_blocking(move || FileParser::extract(&parse_name, &data))
        .await
        .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))??;

    let outcome = state
        .engine()
        .ingest_from(
            &safe_name,
            &text,
            DocumentSource::File(path.display().to_string()),
        )
        .await?;

    Ok(Json(IngestResponse {
        message: "File processed successfully".to_string(),
        document_id: outcome.document_id,
        chunks: outcome.chunks,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// POST /process_url - Fetch a web page and index its paragraph text
pub async fn process_url(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();
    let Json(request) = payload?;
    let url = request
        .url()
        .ok_or_else(|| Error::validation("No URL provided"))?;

    let text = state.web().extract(url).await?;
    let outcome = state
        .engine()
        .ingest_from(url, &text, DocumentSource::Url(url.to_string()))
        .await?;

    Ok(Json(IngestResponse {
        message: "URL processed successfully".to_string(),
        document_id: outcome.document_id,
        chunks: outcome.chunks,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// Reduce a client-supplied filename to a safe flat name
///
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing dots and
/// underscores are stripped. The result may be empty.
pub fn secure_filename(filename: &str) -> Result<String> {
    static UNSAFE_CHARS: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    let unsafe_chars = UNSAFE_CHARS
        .get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]"))
        .as_ref()
        .map_err(|e| Error::internal(format!("Invalid filename pattern: {}", e)))?;

    let flattened = filename.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = unsafe_chars.replace_all(&joined, "");

    Ok(cleaned.trim_matches(|c| c == '.' || c == '_').to_string())
}
