//! HTTP routes for the Q&A server

pub mod documents;
pub mod ingest;
pub mod query;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::server::state::AppState;

/// Ingestion and chat routes, served at the root
pub fn qa_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(ingest::upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/process_url", post(ingest::process_url))
        .route("/chat", post(query::chat))
}

/// Inspection routes, nested under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(documents::list_documents))
        .route("/documents/:id", get(documents::get_document))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine();
    let store = engine.store();

    Json(json!({
        "name": "docqa-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with in-memory semantic retrieval",
        "endpoints": {
            "POST /upload": "Upload a txt, pdf or docx file (multipart field 'file')",
            "POST /process_url": "Fetch and index a web page",
            "POST /chat": "Ask a question about the indexed documents",
            "GET /api/documents": "List indexed documents",
            "GET /api/documents/:id": "Get document details"
        },
        "models": {
            "embedding": engine.embedder().name(),
            "embedding_dimensions": engine.embedder().dimensions(),
            "generation": engine.llm().model()
        },
        "store": {
            "documents": store.len(),
            "chunks": store.total_chunks()
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RagConfig;
    use crate::engine::testing::{FakeEmbedder, FakeLlm};
    use crate::engine::RagEngine;
    use crate::retrieval::DocumentStore;
    use crate::server::router;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Html,
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct Harness {
        state: AppState,
        llm: Arc<FakeLlm>,
        uploads: TempDir,
    }

    fn harness() -> Harness {
        let uploads = TempDir::new().unwrap();
        let mut config = RagConfig::default();
        config.upload.upload_dir = uploads.path().join("uploads");

        let llm = Arc::new(FakeLlm::default());
        let engine = RagEngine::new(
            &config,
            Arc::new(DocumentStore::new()),
            Arc::new(FakeEmbedder::new(4)),
            llm.clone(),
        )
        .unwrap();
        let state = AppState::with_engine(config, Arc::new(engine)).unwrap();

        Harness { state, llm, uploads }
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(field: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {}\r\n\
             --XBOUNDARY--\r\n",
            field, filename, content
        );
        Request::post("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let h = harness();
        let response = router(h.state.clone())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        h.state.set_ready(false);
        let response = router(h.state.clone())
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_chat_requires_query() {
        let h = harness();

        let (status, body) = send(&h.state, post_json("/chat", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let (status, _) = send(&h.state, post_json("/chat", json!({ "query": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(h.llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_format() {
        let h = harness();

        let malformed = Request::post("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&h.state, malformed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let untyped = Request::post("/chat")
            .body(Body::from(json!({ "query": "q" }).to_string()))
            .unwrap();
        let (status, body) = send(&h.state, untyped).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let untyped = Request::post("/process_url")
            .body(Body::from(json!({ "url": "http://example.com" }).to_string()))
            .unwrap();
        let (status, body) = send(&h.state, untyped).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let not_multipart = Request::post("/upload")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("hello"))
            .unwrap();
        let (status, body) = send(&h.state, not_multipart).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        assert!(h.llm.prompts.lock().is_empty());
        assert!(h.state.engine().store().is_empty());
    }

    #[tokio::test]
    async fn test_chat_answers_from_indexed_text() {
        let h = harness();
        h.state.engine().ingest("notes", "alpha beta gamma").await.unwrap();

        let (status, body) =
            send(&h.state, post_json("/chat", json!({ "query": "alpha?" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["answer"].as_str().unwrap().starts_with("answer from"));
        assert_eq!(body["chunks_used"], 1);

        let prompts = h.llm.prompts.lock();
        assert_eq!(
            prompts[0].0,
            "Context: alpha beta gamma\n\nQuestion: alpha?\n\nAnswer:"
        );
        assert_eq!(prompts[0].1, 150);
    }

    #[tokio::test]
    async fn test_chat_on_empty_store_still_answers() {
        let h = harness();
        let (status, _) = send(&h.state, post_json("/chat", json!({ "query": "anything" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            h.llm.prompts.lock()[0].0,
            "Context: \n\nQuestion: anything\n\nAnswer:"
        );
    }

    #[tokio::test]
    async fn test_chat_rejects_zero_top_k() {
        let h = harness();
        let (status, _) =
            send(&h.state, post_json("/chat", json!({ "query": "q", "top_k": 0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_text_file() {
        let h = harness();

        let (status, body) = send(&h.state, multipart("file", "My Notes.txt", "hello world")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_id"], "My_Notes.txt");
        assert_eq!(body["chunks"], 1);

        let saved = h.uploads.path().join("uploads").join("My_Notes.txt");
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "hello world");

        let (status, body) = send(
            &h.state,
            Request::get("/api/documents").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["documents"][0]["id"], "My_Notes.txt");
        assert_eq!(body["documents"][0]["source"]["kind"], "file");
    }

    #[tokio::test]
    async fn test_upload_rejections() {
        let h = harness();

        let (status, body) = send(&h.state, multipart("file", "sheet.xlsx", "data")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let (status, _) = send(&h.state, multipart("attachment", "notes.txt", "data")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&h.state, multipart("file", "", "data")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(h.state.engine().store().is_empty());
    }

    #[tokio::test]
    async fn test_upload_corrupt_pdf_is_unprocessable() {
        let h = harness();
        let (status, body) = send(&h.state, multipart("file", "broken.pdf", "not a pdf")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["type"], "extraction_error");
        assert!(h.state.engine().store().is_empty());
    }

    #[tokio::test]
    async fn test_process_url() {
        let h = harness();

        let (status, _) = send(&h.state, post_json("/process_url", json!({ "url": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let site = Router::new().route(
            "/page",
            get(|| async { Html("<html><body><p>Rust is fast.</p><p>Rust is safe.</p></body></html>") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, site).await.unwrap();
        });
        let url = format!("http://{}/page", addr);

        let (status, body) = send(&h.state, post_json("/process_url", json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_id"], url.as_str());

        let entry = h.state.engine().store().get(&url).unwrap();
        assert_eq!(entry.chunk_text(0), Some("Rust is fast. Rust is safe."));

        let encoded = url.replace(':', "%3A").replace('/', "%2F");
        let (status, body) = send(
            &h.state,
            Request::get(format!("/api/documents/{}", encoded))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"]["kind"], "url");
    }

    #[tokio::test]
    async fn test_unknown_document_is_404() {
        let h = harness();
        let (status, body) = send(
            &h.state,
            Request::get("/api/documents/missing").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found");
    }

    #[tokio::test]
    async fn test_info_reports_store_stats() {
        let h = harness();
        h.state.engine().ingest("d1", "some text").await.unwrap();

        let (status, body) =
            send(&h.state, Request::get("/api/info").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "docqa-rag");
        assert_eq!(body["store"]["documents"], 1);
        assert_eq!(body["models"]["generation"], "fake-model");
    }
}
