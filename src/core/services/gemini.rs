//! Gemini REST client
//!
//! One `generateContent` endpoint serves both recipe generation and
//! translation; only the prompt and the response MIME type differ.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::prompts::{recipe_prompt, translation_prompt};
use super::{ContentTranslator, RecipeGenerator};
use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::{ERR_GENERATION_MALFORMED, ERR_GENERATION_NETWORK, ERR_TRANSLATION_FAILED};
use crate::shared::settings::GeminiSettings;
use crate::shared::translatable::TranslationPayload;
use crate::shared::types::GeneratedRecipe;

// -- Wire types for generateContent --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// The model may wrap its JSON in prose or code fences; take the span from
/// the first `{` to the last `}`.
pub(crate) fn extract_json_block(text: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"));
    re.find(text).map(|m| m.as_str())
}

pub(crate) fn parse_generated_recipe(text: &str) -> AppResult<GeneratedRecipe> {
    let block = extract_json_block(text).ok_or_else(|| {
        error!("[Gemini] No JSON object in recipe response");
        AppError::Parse(ERR_GENERATION_MALFORMED.to_string())
    })?;

    serde_json::from_str::<GeneratedRecipe>(block).map_err(|e| {
        error!(error = %e, "[Gemini] Recipe JSON did not match the expected shape");
        AppError::Parse(ERR_GENERATION_MALFORMED.to_string())
    })
}

pub(crate) fn parse_translation(text: &str) -> AppResult<TranslationPayload> {
    let block = extract_json_block(text).unwrap_or(text);
    match serde_json::from_str::<Value>(block) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            error!(kind = ?other, "[Gemini] Translation response is not a JSON object");
            Err(AppError::Parse(ERR_TRANSLATION_FAILED.to_string()))
        }
        Err(e) => {
            error!(error = %e, "[Gemini] Failed to parse translation response");
            Err(AppError::Parse(ERR_TRANSLATION_FAILED.to_string()))
        }
    }
}

pub struct GeminiClient {
    http: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings, timeout: Option<Duration>) -> AppResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AppError::Config("API_KEY environment variable not set".to_string()));
        }
        let mut builder = Client::builder().user_agent("toma-kitchen/gemini");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.settings.model),
            urlencoding::encode(&self.settings.api_key)
        )
    }

    /// Sends one prompt and returns the model's text.
    async fn generate_text(&self, prompt: &str, json_response: bool) -> AppResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: json_response.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!("Gemini API error: {}", response.status())));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid Gemini response: {}", e)))?;

        parsed
            .text()
            .ok_or_else(|| AppError::Parse("Gemini returned no text".to_string()))
    }
}

#[async_trait]
impl RecipeGenerator for GeminiClient {
    async fn generate_recipe(&self, ingredients: &str) -> AppResult<GeneratedRecipe> {
        info!(model = %self.settings.model, "[Gemini] Generating recipe");

        let text = match self.generate_text(&recipe_prompt(ingredients), false).await {
            Ok(text) => text,
            Err(AppError::Parse(msg)) => {
                error!(error = %msg, "[Gemini] Error generating recipe");
                return Err(AppError::Parse(ERR_GENERATION_MALFORMED.to_string()));
            }
            Err(e) => {
                error!(error = %e, "[Gemini] Error generating recipe");
                return Err(AppError::Network(ERR_GENERATION_NETWORK.to_string()));
            }
        };
        debug!(chars = text.len(), "[Gemini] Recipe response received");

        parse_generated_recipe(text.trim())
    }
}

#[async_trait]
impl ContentTranslator for GeminiClient {
    async fn translate_content(
        &self,
        content: &TranslationPayload,
        language_name: &str,
    ) -> AppResult<TranslationPayload> {
        info!(language = %language_name, keys = content.len(), "[Gemini] Translating content");

        let text = self
            .generate_text(&translation_prompt(content, language_name), true)
            .await
            .map_err(|e| {
                error!(error = %e, language = %language_name, "[Gemini] Error translating content");
                match e {
                    AppError::Parse(_) => AppError::Parse(ERR_TRANSLATION_FAILED.to_string()),
                    _ => AppError::Network(ERR_TRANSLATION_FAILED.to_string()),
                }
            })?;

        parse_translation(text.trim())
    }
}
