//! Semantic transcript segmentation.
//!
//! Takes one long, punctuation-delimited transcript and splits it into
//! topically coherent chunks using sentence-embedding similarity and an
//! adaptive statistical threshold.
//!
//! ```text
//! Transcript ──► segmenter::split_sentences ──► [Sentence]
//!                                                   │
//!                     (≤ 3 sentences: single-chunk short circuit)
//!                                                   │
//! [Sentence] ──► embeddings::EmbeddingProvider ──► [Vec<f32>]  (one batched call)
//!                                                   │
//! [Vec<f32>] ──► similarity::adjacent_scores ──► [Option<f64>]
//!                                                   │
//!                     breakpoints::threshold_statistics (mean − 0.5·σ)
//!                     breakpoints::detect_boundaries    (strict `<`)
//!                                                   │
//! boundaries ──► assembly::assemble_chunks ──► assembly::merge_small_chunks
//!                                                   │
//!                                    SegmentationOutcome { chunks, stats }
//! ```
//!
//! The whole pipeline is one synchronous pass per call; the only await
//! point is the single batched embedding request. Concurrent runs share
//! no state.

pub mod assembly;
pub mod breakpoints;
pub mod config;
pub mod embeddings;
pub mod segmenter;
pub mod service;
pub mod similarity;
pub mod types;

pub use config::{OpenAiConfig, SegmentationConfig};
pub use embeddings::{
    EmbeddingError, EmbeddingProvider, MockEmbeddingProvider, OpenAiEmbeddingProvider,
};
pub use service::{
    SegmentationResponse, SegmentationService, SegmentationServiceBuilder, SegmentationTelemetry,
};
pub use types::{
    SegmentationError, SegmentationOutcome, SegmentationStats, SegmentedChunk, Sentence,
    ThresholdStatistics,
};
