//! Retriever Port - Topically relevant reference text for a query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A retrieved chunk of reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub page_content: String,
    /// Where the chunk came from (file path or similar), if known.
    pub source: Option<String>,
}

impl RetrievedDocument {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Port for retrieval-augmented generation support.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns documents relevant to `query`, most relevant first.
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, RetrievalError>;
}

/// Retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("failed to read documents: {0}")]
    Io(#[from] std::io::Error),

    #[error("retrieval backend unavailable: {0}")]
    Unavailable(String),
}

/// Joins document contents into the single context string given to the agent.
pub fn join_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|d| d.page_content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_context_separates_documents_with_blank_line() {
        let docs = vec![
            RetrievedDocument::new("first chunk "),
            RetrievedDocument::new("   "),
            RetrievedDocument::new("second chunk").with_source("notes.txt"),
        ];
        assert_eq!(join_context(&docs), "first chunk\n\nsecond chunk");
    }

    #[test]
    fn join_context_of_nothing_is_empty() {
        assert_eq!(join_context(&[]), "");
    }
}
