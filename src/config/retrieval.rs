//! Retrieval configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::retrieval::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TOP_K};

/// Reference-document retrieval. Optional; absent means no context.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Directory scanned for `*.txt` and `*.pdf` files
    pub data_directory: PathBuf,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Documents returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl RetrievalConfig {
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("RETRIEVAL__DATA_DIRECTORY"));
        }
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(ValidationError::InvalidChunking);
        }
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetrievalConfig::new("data");
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert_eq!(config.top_k, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = RetrievalConfig {
            chunk_overlap: 1000,
            ..RetrievalConfig::new("data")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunking));

        let config = RetrievalConfig {
            top_k: 0,
            ..RetrievalConfig::new("data")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTopK));

        assert!(RetrievalConfig::new("").validate().is_err());
    }
}
