use async_trait::async_trait;
use serde::Deserialize;

use crate::{ProviderMetadata, TranslateError, Translator};

#[derive(Clone)]
pub struct DeeplTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeeplTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    fn form(
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = texts
            .iter()
            .map(|text| ("text", text.clone()))
            .collect();
        params.push(("target_lang", target_lang.to_uppercase()));
        if let Some(source) = source_lang {
            params.push(("source_lang", source.to_uppercase()));
        }
        params
    }
}

#[derive(Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Deserialize)]
struct DeeplTranslation {
    text: String,
}

#[async_trait]
impl Translator for DeeplTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<String>, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let params = Self::form(texts, target_lang, source_lang);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: DeeplResponse = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.translations.into_iter().map(|t| t.text).collect())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
