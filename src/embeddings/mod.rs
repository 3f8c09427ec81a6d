//! Boundary to the external embedding provider.
//!
//! The engine submits the whole sentence sequence as one batched request
//! and expects index-aligned vectors back, one per snippet, all with the
//! same dimensionality. Any deviation is a provider contract violation and
//! terminates the run; the engine never retries internally (retry policy
//! belongs to the caller).

use async_trait::async_trait;
use thiserror::Error;

pub mod mock;
pub mod openai;

pub use mock::MockEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;

/// Failures crossing the embedding provider boundary.
///
/// Provider-supplied diagnostic detail (status codes, response bodies) is
/// preserved verbatim so callers can act on it.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the embedding endpoint.
    #[error("embedding endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not parse into the expected shape.
    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),

    /// The provider returned a different number of vectors than snippets
    /// submitted. Never truncate or pad around this.
    #[error("embedding count mismatch: sent {requested} snippets, received {received} vectors")]
    CountMismatch { requested: usize, received: usize },

    /// Vectors in one response disagree on dimensionality.
    #[error("embedding dimension mismatch: expected {expected}, vector {index} has {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Provider-specific failure that fits none of the above.
    #[error("embedding provider error: {0}")]
    Provider(String),
}

/// An ordered-batch embedding source.
///
/// Implementations must preserve input order and return exactly one vector
/// per input. How the vectors are produced (remote call, local model,
/// cache) is the implementation's business.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short identifier used in telemetry and logs.
    fn id(&self) -> &str;

    /// Embeds the whole snippet sequence in one request.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Asserts that every vector in a run shares one dimensionality.
///
/// Run before any similarity math so provider contract violations surface
/// early instead of as silently wrong scores. Returns the shared dimension.
pub fn ensure_uniform_dimensions(vectors: &[Vec<f32>]) -> Result<usize, EmbeddingError> {
    let Some(first) = vectors.first() else {
        return Ok(0);
    };
    let expected = first.len();
    for (index, vector) in vectors.iter().enumerate().skip(1) {
        if vector.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                index,
                expected,
                actual: vector.len(),
            });
        }
    }
    Ok(expected)
}
