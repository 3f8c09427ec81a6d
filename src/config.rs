//! Tuning knobs for the pipeline and connection settings for the
//! OpenAI-compatible embedding endpoint.

use std::time::Duration;

/// Pipeline configuration with the stock defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Chunks below this many words are folded into their predecessor
    /// during the merge pass.
    pub min_chunk_words: usize,
    /// Transcripts with fewer sentences than this skip embedding entirely
    /// and come back as a single chunk.
    pub min_sentences_for_embedding: usize,
    /// The threshold sits this many standard deviations below the mean
    /// similarity.
    pub std_dev_factor: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_chunk_words: 150,
            min_sentences_for_embedding: 4,
            std_dev_factor: 0.5,
        }
    }
}

/// Connection settings for an OpenAI-compatible `/embeddings` endpoint.
///
/// The engine treats these as opaque caller-supplied credentials; it applies
/// no retry or backoff around the request. The timeout is plain connection
/// hygiene on the HTTP client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Optional reduced output dimensionality, passed through to the API.
    pub dimensions: Option<usize>,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "text-embedding-3-small";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            dimensions: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Loads settings from the environment (and a `.env` file if present).
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL`,
    /// `OPENAI_EMBEDDING_MODEL`, and `OPENAI_EMBEDDING_DIMENSIONS` override
    /// the defaults when set. Returns `None` when no API key is configured.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENAI_EMBEDDING_MODEL") {
            config.model = model;
        }
        if let Ok(dimensions) = std::env::var("OPENAI_EMBEDDING_DIMENSIONS") {
            config.dimensions = dimensions.parse().ok();
        }
        Some(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = SegmentationConfig::default();
        assert_eq!(config.min_chunk_words, 150);
        assert_eq!(config.min_sentences_for_embedding, 4);
        assert!((config.std_dev_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn openai_config_builders_override_defaults() {
        let config = OpenAiConfig::new("key")
            .with_base_url("http://localhost:9000/v1")
            .with_model("custom-model")
            .with_dimensions(256)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.dimensions, Some(256));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
