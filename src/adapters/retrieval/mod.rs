//! Retrieval Adapters.

mod chunker;
mod keyword_retriever;

pub use chunker::{TextChunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use keyword_retriever::{KeywordRetriever, DEFAULT_TOP_K};
