pub mod batch;
pub mod cache;
pub mod deepl;

pub use batch::{
    BatchOptions, RequestKind, TranslationRequest, TranslationStats, apply_translations,
    collect_requests, translate_dataset, translate_requests,
};
pub use cache::TranslationCache;
pub use deepl::DeeplTranslator;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` into `target_lang`. The result has the same length
    /// and order as `texts`.
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<String>, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Provider returned {got} translations for {expected} texts")]
    CountMismatch { expected: usize, got: usize },
}
