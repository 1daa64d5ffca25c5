//! Request types

use serde::{Deserialize, Serialize};

/// Chat request: a question answered from the indexed documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    #[serde(default)]
    pub query: Option<String>,

    /// Number of chunks used as context (default from configuration)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl ChatRequest {
    /// Create a request for a question
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            top_k: None,
        }
    }

    /// Question text, if present and not blank
    pub fn question(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Request to ingest a web page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlRequest {
    /// Page URL
    #[serde(default)]
    pub url: Option<String>,
}

impl UrlRequest {
    /// URL, if present and not blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_question_is_missing() {
        let req: ChatRequest = serde_json::from_str(r#"{"query": "   "}"#).unwrap();
        assert_eq!(req.question(), None);

        let req: ChatRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.question(), None);

        let req: ChatRequest = serde_json::from_str(r#"{"query": " why? ", "top_k": 5}"#).unwrap();
        assert_eq!(req.question(), Some("why?"));
        assert_eq!(req.top_k, Some(5));
    }

    #[test]
    fn test_url_request() {
        let req: UrlRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert_eq!(req.url(), None);
    }
}
