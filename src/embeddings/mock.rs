//! Deterministic in-process embedding provider for tests and offline runs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{EmbeddingError, EmbeddingProvider};

/// Embedding provider that never touches the network.
///
/// By default each input text hashes to a reproducible pseudo-random
/// vector, so identical text always embeds identically and different text
/// (almost) never collides. Scripted mode returns a fixed vector sequence
/// regardless of input, which lets tests stage exact similarity profiles —
/// including degenerate ones like zero vectors or short batches.
#[derive(Debug, Default)]
pub struct MockEmbeddingProvider {
    scripted: Option<Vec<Vec<f32>>>,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    const DIMENSIONS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns exactly these vectors, in order, on every call.
    pub fn with_vectors(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            scripted: Some(vectors),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed_batch` calls issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hash_vector(text: &str) -> Vec<f32> {
        let mut state = {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            hasher.finish()
        };
        (0..Self::DIMENSIONS)
            .map(|_| {
                // xorshift keeps each component reproducible per input text
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state as f64 / u64::MAX as f64) as f32 - 0.5
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    fn id(&self) -> &str {
        "mock"
    }

    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.scripted {
            Some(vectors) => Ok(vectors.clone()),
            None => Ok(inputs.iter().map(|text| Self::hash_vector(text)).collect()),
        }
    }
}
