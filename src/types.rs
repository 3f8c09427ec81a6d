//! Core data types and the error taxonomy for segmentation runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// A single sentence produced by the segmenter.
///
/// `index` equals the sentence's position in the original transcript and is
/// the only identity-bearing attribute; the text is never normalized beyond
/// trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

/// A contiguous run of sentences judged topically coherent, paired with its
/// word count for the merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentedChunk {
    pub text: String,
    pub word_count: usize,
}

/// Distribution statistics behind one run's adaptive threshold.
///
/// `std_dev` is the population standard deviation (divide by count, not
/// count − 1) and `threshold = mean − factor · std_dev`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
}

/// Final result of a segmentation run: the ordered chunk texts plus the
/// run's summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationOutcome {
    pub chunks: Vec<String>,
    pub stats: SegmentationStats,
}

/// Per-run counters surfaced alongside the chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentationStats {
    pub sentence_count: usize,
    pub boundary_count: usize,
    pub chunk_count: usize,
    /// Undersized chunks folded into their predecessor by the merge pass.
    pub merged_chunks: usize,
    /// Adjacent pairs whose similarity was undefined (zero-magnitude vector)
    /// and therefore excluded from the threshold statistics.
    pub undefined_scores: usize,
    /// `None` when the run short-circuited or every score was undefined.
    pub threshold: Option<ThresholdStatistics>,
}

/// Terminating errors for a segmentation run.
///
/// Provider failures propagate verbatim; there is no partial or best-effort
/// chunk output on failure. Degenerate zero-magnitude vectors are handled
/// inside the similarity stage and never surface here.
#[derive(Debug, Error)]
pub enum SegmentationError {
    /// Empty or whitespace-only transcript; no embedding call is attempted.
    #[error("invalid transcript: {0}")]
    InvalidInput(String),

    /// The embedding provider call failed (transport, status, malformed
    /// body, or count/dimension mismatch).
    #[error(transparent)]
    EmbeddingProvider(#[from] EmbeddingError),
}
