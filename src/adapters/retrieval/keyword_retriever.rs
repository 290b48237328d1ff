//! In-memory lexical retriever over a directory of reference documents.
//!
//! Every `*.txt` and `*.pdf` file below the data directory (any depth) is
//! split with a [`TextChunker`] at load time. A query ranks chunks by how many of its
//! terms occur in them; ties keep load order (files sorted by path).

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

use super::chunker::TextChunker;
use crate::ports::{RetrievalError, RetrievedDocument, Retriever};

/// Default number of documents returned per query.
pub const DEFAULT_TOP_K: usize = 4;

#[derive(Debug, Clone)]
struct IndexedChunk {
    content: String,
    source: String,
    terms: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("txt") {
            Some(Self::Text)
        } else if ext.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }

    fn read(self, path: &Path) -> Result<String, String> {
        match self {
            Self::Text => std::fs::read_to_string(path).map_err(|e| e.to_string()),
            Self::Pdf => {
                let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
                let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())?;
                Ok(text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

/// Lowercased alphanumeric terms, ignoring single characters.
fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1)
        .map(|t| t.to_lowercase())
}

/// Keyword-overlap retriever.
#[derive(Debug, Clone)]
pub struct KeywordRetriever {
    chunks: Vec<IndexedChunk>,
    top_k: usize,
}

impl KeywordRetriever {
    /// Creates an empty retriever; add text with [`KeywordRetriever::add_text`].
    pub fn new(top_k: usize) -> Self {
        Self {
            chunks: Vec::new(),
            top_k: top_k.max(1),
        }
    }

    /// Loads and chunks every `.txt` and `.pdf` file below `directory`.
    /// Unreadable files are skipped.
    pub fn from_directory(
        directory: impl AsRef<Path>,
        chunker: &TextChunker,
        top_k: usize,
    ) -> Result<Self, RetrievalError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(RetrievalError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("data directory not found: {}", directory.display()),
            )));
        }

        let mut retriever = Self::new(top_k);
        let mut files = 0usize;

        for entry in WalkDir::new(directory)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let Some(kind) = DocumentKind::of(path) else {
                continue;
            };

            match kind.read(path) {
                Ok(text) => {
                    retriever.add_text(&path.to_string_lossy(), &text, chunker);
                    files += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                }
            }
        }

        tracing::info!(
            directory = %directory.display(),
            files,
            chunks = retriever.len(),
            "Loaded retrieval documents"
        );

        Ok(retriever)
    }

    /// Chunks `text` and indexes the chunks under `source`.
    pub fn add_text(&mut self, source: &str, text: &str, chunker: &TextChunker) {
        for content in chunker.chunk(text) {
            let chunk_terms = terms(&content).collect();
            self.chunks.push(IndexedChunk {
                content,
                source: source.to_string(),
                terms: chunk_terms,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn rank(&self, query: &str) -> Vec<RetrievedDocument> {
        let query_terms: HashSet<String> = terms(query).collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &IndexedChunk)> = self
            .chunks
            .iter()
            .map(|chunk| (query_terms.iter().filter(|t| chunk.terms.contains(*t)).count(), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();

        // stable: equal scores keep load order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, chunk)| {
                RetrievedDocument::new(chunk.content.clone()).with_source(chunk.source.clone())
            })
            .collect()
    }
}

#[async_trait]
impl Retriever for KeywordRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        Ok(self.rank(query))
    }
}
