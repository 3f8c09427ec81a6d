//! Segmentation service facade: wires the pipeline stages together.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::assembly;
use crate::breakpoints;
use crate::config::SegmentationConfig;
use crate::embeddings::{self, EmbeddingError, EmbeddingProvider};
use crate::segmenter;
use crate::similarity;
use crate::types::{SegmentationError, SegmentationOutcome, SegmentationStats};

/// Per-run observability record, surfaced next to the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationTelemetry {
    pub embedder: String,
    pub duration_ms: u64,
    pub sentence_count: usize,
    pub chunk_count: usize,
    /// True when the ≤ 3-sentence guard skipped embedding entirely.
    pub short_circuited: bool,
}

/// Outcome plus telemetry for one segmentation run.
#[derive(Debug, Clone)]
pub struct SegmentationResponse {
    pub outcome: SegmentationOutcome,
    pub telemetry: SegmentationTelemetry,
}

/// Splits transcripts into topically coherent chunks.
///
/// One synchronous pipeline per call; the only await point is the single
/// batched embedding request. The service holds no per-run state, so one
/// instance behind an [`Arc`] serves concurrent runs without coordination.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chunkwright::{OpenAiConfig, OpenAiEmbeddingProvider, SegmentationService};
///
/// let provider = OpenAiEmbeddingProvider::new(OpenAiConfig::from_env().unwrap())?;
/// let service = SegmentationService::builder()
///     .with_embedding_provider(Arc::new(provider))
///     .build();
/// let response = service.segment(transcript).await?;
/// for chunk in &response.outcome.chunks {
///     println!("{chunk}");
/// }
/// ```
pub struct SegmentationService {
    provider: Arc<dyn EmbeddingProvider>,
    config: SegmentationConfig,
}

impl SegmentationService {
    /// Create a new builder for constructing a `SegmentationService`.
    pub fn builder() -> SegmentationServiceBuilder {
        SegmentationServiceBuilder::default()
    }

    /// Segments one transcript into ordered, trimmed, non-empty chunks.
    ///
    /// Fails with [`SegmentationError::InvalidInput`] on an empty or
    /// whitespace-only transcript (no embedding call is made) and with
    /// [`SegmentationError::EmbeddingProvider`] when the provider call
    /// fails in any way. There is no partial output on failure.
    #[instrument(skip_all, fields(embedder = self.provider.id()))]
    pub async fn segment(
        &self,
        transcript: &str,
    ) -> Result<SegmentationResponse, SegmentationError> {
        let started = Instant::now();

        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return Err(SegmentationError::InvalidInput(
                "transcript is empty or whitespace-only".to_string(),
            ));
        }

        let sentences = segmenter::split_sentences(trimmed);
        let sentence_count = sentences.len();

        if sentence_count < self.config.min_sentences_for_embedding {
            // Too little signal to segment; embedding 1-3 snippets is
            // wasted provider cost.
            tracing::debug!(sentence_count, "below embedding minimum, emitting single chunk");
            let outcome = SegmentationOutcome {
                chunks: vec![trimmed.to_string()],
                stats: SegmentationStats {
                    sentence_count,
                    chunk_count: 1,
                    ..Default::default()
                },
            };
            return Ok(SegmentationResponse {
                outcome,
                telemetry: self.telemetry(started, sentence_count, 1, true),
            });
        }

        let texts: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
        let vectors = self.provider.embed_batch(&texts).await?;
        if vectors.len() != sentence_count {
            return Err(EmbeddingError::CountMismatch {
                requested: sentence_count,
                received: vectors.len(),
            }
            .into());
        }
        embeddings::ensure_uniform_dimensions(&vectors)?;

        let scores = similarity::adjacent_scores(&vectors);
        // Vectors are owned by the run and not needed past this point.
        drop(vectors);

        let undefined_scores = scores.iter().filter(|s| s.is_none()).count();
        let statistics = breakpoints::threshold_statistics(&scores, self.config.std_dev_factor);
        let boundaries = match statistics {
            Some(stats) => breakpoints::detect_boundaries(&scores, stats.threshold),
            // Every score was undefined; nothing to cut on.
            None => Vec::new(),
        };
        let boundary_count = boundaries.len();

        let assembled = assembly::assemble_chunks(&sentences, &boundaries);
        let (chunks, merged_chunks) =
            assembly::merge_small_chunks(assembled, self.config.min_chunk_words);
        let chunk_texts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();
        let chunk_count = chunk_texts.len();

        if let Some(stats) = &statistics {
            tracing::debug!(
                mean = stats.mean,
                std_dev = stats.std_dev,
                threshold = stats.threshold,
                undefined_scores,
                "adaptive threshold computed"
            );
        }
        tracing::info!(sentence_count, boundary_count, chunk_count, "transcript segmented");

        let outcome = SegmentationOutcome {
            chunks: chunk_texts,
            stats: SegmentationStats {
                sentence_count,
                boundary_count,
                chunk_count,
                merged_chunks,
                undefined_scores,
                threshold: statistics,
            },
        };
        Ok(SegmentationResponse {
            outcome,
            telemetry: self.telemetry(started, sentence_count, chunk_count, false),
        })
    }

    fn telemetry(
        &self,
        started: Instant,
        sentence_count: usize,
        chunk_count: usize,
        short_circuited: bool,
    ) -> SegmentationTelemetry {
        SegmentationTelemetry {
            embedder: self.provider.id().to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
            sentence_count,
            chunk_count,
            short_circuited,
        }
    }
}

/// Builder for [`SegmentationService`] instances.
#[derive(Default)]
pub struct SegmentationServiceBuilder {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    config: Option<SegmentationConfig>,
}

impl SegmentationServiceBuilder {
    /// Set the embedding provider. Required before [`build()`](Self::build).
    #[must_use]
    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Override the default pipeline configuration.
    #[must_use]
    pub fn with_config(mut self, config: SegmentationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the service.
    ///
    /// # Panics
    ///
    /// Panics if no embedding provider was set.
    pub fn build(self) -> SegmentationService {
        SegmentationService {
            provider: self
                .provider
                .expect("SegmentationServiceBuilder requires an embedding provider"),
            config: self.config.unwrap_or_default(),
        }
    }

    /// Build the service, returning `None` if no provider was set.
    pub fn try_build(self) -> Option<SegmentationService> {
        Some(SegmentationService {
            provider: self.provider?,
            config: self.config.unwrap_or_default(),
        })
    }
}
