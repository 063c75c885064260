//! Boundary-aware text chunking.
//!
//! [`TextChunker`] splits document text into an ordered sequence of
//! overlapping [`Chunk`]s. Each cut prefers a natural boundary — paragraph,
//! then sentence, then line, then word — before falling back to a hard cut
//! at the size limit, and consecutive chunks always share exactly
//! `chunk_overlap` chars. Dropping each later chunk's first `chunk_overlap`
//! chars and concatenating reconstructs the input text exactly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChunkingConfig;

/// Split-point candidates in preference order: paragraph, sentence, line,
/// word. A plain character cut is the fallback when none of these fit.
const SEPARATORS: [&str; 6] = ["\n\n", ". ", "! ", "? ", "\n", " "];

/// A bounded substring of a document, the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in document order, starting at zero.
    pub index: usize,
    /// The chunk text, including the overlap shared with its predecessor.
    pub text: String,
}

/// Splits text into overlapping chunks bounded by a maximum char count.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker from a validated [`ChunkingConfig`].
    pub fn new(config: &ChunkingConfig) -> Self {
        Self { chunk_size: config.chunk_size, chunk_overlap: config.chunk_overlap }
    }

    /// The overlap, in chars, shared between consecutive chunks.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into chunks in document order.
    ///
    /// Empty input produces an empty sequence. Every chunk except possibly
    /// the last has at most `chunk_size` chars; each chunk after the first
    /// begins with the final `chunk_overlap` chars of its predecessor.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offsets of char boundaries; offsets[i] is where the i-th
        // char starts, offsets[total] == text.len(). All windowing below
        // is in char units mapped through this table, so multi-byte text
        // never gets sliced mid-char.
        let mut offsets: Vec<usize> = text.char_indices().map(|(o, _)| o).collect();
        offsets.push(text.len());
        let total = offsets.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let limit = (start + self.chunk_size).min(total);
            let end = if limit == total {
                total
            } else {
                self.cut_point(text, &offsets, start, limit)
            };

            chunks.push(Chunk {
                index: chunks.len(),
                text: text[offsets[start]..offsets[end]].to_string(),
            });

            if end == total {
                break;
            }
            start = end - self.chunk_overlap;
        }

        debug!(chunk_count = chunks.len(), total_chars = total, "chunked text");
        chunks
    }

    /// Pick the cut for a chunk starting at char `start` whose hard limit
    /// is char `limit`. Returns the latest occurrence of the
    /// highest-priority separator inside the window, or `limit` when no
    /// separator cut would advance the window past the overlap.
    fn cut_point(&self, text: &str, offsets: &[usize], start: usize, limit: usize) -> usize {
        let window = &text[offsets[start]..offsets[limit]];
        for separator in SEPARATORS {
            if let Some(pos) = window.rfind(separator) {
                // Separators are ASCII, so the cut lands on a char boundary.
                let cut_byte = offsets[start] + pos + separator.len();
                let cut = offsets.partition_point(|&o| o < cut_byte);
                // The next window starts at cut - chunk_overlap; it must
                // move strictly forward or the chunker would loop.
                if cut > start + self.chunk_overlap {
                    return cut;
                }
            }
        }
        limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, overlap: usize) -> TextChunker {
        let config =
            ChunkingConfig::builder().chunk_size(size).chunk_overlap(overlap).build().unwrap();
        TextChunker::new(&config)
    }

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.text);
            } else {
                out.extend(chunk.text.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunker(800, 50).chunk("").is_empty());
    }

    #[test]
    fn input_within_size_is_a_single_chunk() {
        let chunks = chunker(800, 50).chunk("hello world");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].text, "hello world");
    }

    #[test]
    fn uniform_text_splits_into_two_chunks_with_exact_overlap() {
        // 1000 chars with no natural boundaries: hard cut at 800, the
        // second chunk restarts 50 chars back.
        let text = "A".repeat(1000);
        let chunks = chunker(800, 50).chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text.chars().count(), 800);
        assert_eq!(chunks[1].text.chars().count(), 250);
        assert!(chunks[1].text.chars().count() >= 200);
        let suffix: String = chunks[0].text.chars().rev().take(50).collect();
        let prefix: String = chunks[1].text.chars().take(50).collect();
        let suffix: String = suffix.chars().rev().collect();
        assert_eq!(suffix, prefix);
        assert_eq!(reconstruct(&chunks, 50), text);
    }

    #[test]
    fn paragraph_boundary_is_preferred_over_hard_cut() {
        let text = format!("{}\n\n{}", "A".repeat(100), "B".repeat(100));
        let chunks = chunker(150, 10).chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.ends_with("\n\n"));
        assert_eq!(chunks[0].text.chars().count(), 102);
        assert_eq!(reconstruct(&chunks, 10), text);
    }

    #[test]
    fn sentence_boundary_is_used_when_no_paragraph_fits() {
        let text = "One. Two. Three.";
        let chunks = chunker(10, 2).chunk(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "One. Two. ");
        assert_eq!(chunks[1].text, ". Three.");
        assert_eq!(reconstruct(&chunks, 2), text);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = "α".repeat(100);
        let chunks = chunker(30, 5).chunk(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 30);
        }
        assert_eq!(reconstruct(&chunks, 5), text);
    }

    #[test]
    fn chunk_indices_follow_document_order() {
        let text = "word ".repeat(500);
        let chunks = chunker(100, 10).chunk(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn every_chunk_respects_the_size_bound() {
        let text = "Lorem ipsum dolor sit amet. ".repeat(100);
        let chunks = chunker(120, 30).chunk(&text);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 120);
        }
        assert_eq!(reconstruct(&chunks, 30), text);
    }

    #[test]
    fn zero_overlap_partitions_the_text() {
        let text = "abcdefghij".repeat(10);
        let chunks = chunker(25, 0).chunk(&text);
        assert_eq!(reconstruct(&chunks, 0), text);
        let concatenated: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(concatenated, text);
    }
}
