//! Character-window text splitter for reference documents.
//!
//! Sizes count `char`s, not bytes, so multi-byte text never splits inside a
//! code point.

/// Default chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits text into overlapping, character-counted chunks.
///
/// A chunk prefers to end on whitespace found in its second half, so words
/// are rarely cut in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextChunker {
    /// Sizes are clamped so that `chunk_size >= 1` and `chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.trim().chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();

        if len == 0 {
            return chunks;
        }

        let mut start = 0;
        loop {
            let mut end = (start + self.chunk_size).min(len);

            if end < len {
                let search_from = (start + self.chunk_size / 2).max(start + 1);
                if let Some(ws) = (search_from..end).rev().find(|&i| chars[i].is_whitespace()) {
                    end = ws;
                }
            }

            let piece: String = chars[start..end].iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= len {
                break;
            }

            let next = end.saturating_sub(self.chunk_overlap);
            start = if next > start { next } else { end };
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunker = TextChunker::default();
        assert_eq!(chunker.chunk("  kısa bir not  "), vec!["kısa bir not".to_string()]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(TextChunker::default().chunk(" \n\t ").is_empty());
    }

    #[test]
    fn chunks_respect_size_and_overlap() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let chunker = TextChunker::new(20, 6);
        let chunks = chunker.chunk(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "chunk too long: {chunk:?}");
        }
        // consecutive chunks share text
        for pair in chunks.windows(2) {
            let tail: String = pair[0].split_whitespace().last().unwrap().to_string();
            assert!(pair[1].contains(&tail), "{:?} does not overlap {:?}", pair[1], pair[0]);
        }
        assert!(chunks.last().unwrap().ends_with("kappa"));
    }

    #[test]
    fn handles_multibyte_characters() {
        let text = "ğüşiöç".repeat(50);
        let chunks = TextChunker::new(40, 10).chunk(&text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 40));
        assert!(chunks.len() >= 8);
    }

    #[test]
    fn clamps_degenerate_sizes() {
        let chunker = TextChunker::new(0, 5);
        assert_eq!(chunker.chunk_size(), 1);
        assert_eq!(chunker.chunk_overlap(), 0);
        assert_eq!(chunker.chunk("abc").len(), 3);
    }
}
