//! Share links
//!
//! A share link carries the untranslated recipe and the sharer's language in
//! the URL fragment: compact JSON, zlib-deflated, URL-safe base64.

use std::io::{Read, Write};

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{GeneratedRecipe, LanguageCode, Recipe};

const FRAGMENT_KEY: &str = "#recipe=";

/// Upper bound on the inflated payload; a recipe is a few KiB at most.
const MAX_INFLATED_BYTES: u64 = 256 * 1024;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One-letter keys keep the link short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortenedRecipe {
    pub n: String,
    pub d: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    pub i: Vec<String>,
    pub x: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRecipe {
    pub r: ShortenedRecipe,
    pub l: LanguageCode,
}

impl From<&Recipe> for ShortenedRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            n: recipe.recipe_name.clone(),
            d: recipe.description.clone(),
            pt: recipe.prep_time.clone(),
            ct: recipe.cook_time.clone(),
            tt: recipe.total_time.clone(),
            s: recipe.servings.clone(),
            i: recipe.ingredients.clone(),
            x: recipe.instructions.clone(),
        }
    }
}

impl From<ShortenedRecipe> for GeneratedRecipe {
    fn from(short: ShortenedRecipe) -> Self {
        Self {
            recipe_name: short.n,
            description: short.d,
            ingredients: short.i,
            instructions: short.x,
            prep_time: short.pt,
            cook_time: short.ct,
            total_time: short.tt,
            servings: short.s,
        }
    }
}

pub fn encode_share_payload(recipe: &Recipe, language: &str) -> AppResult<String> {
    let shared = SharedRecipe {
        r: ShortenedRecipe::from(recipe),
        l: language.to_string(),
    };
    let json = serde_json::to_vec(&shared)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    Ok(URL_SAFE_LENIENT.encode(compressed))
}

pub fn decode_share_payload(encoded: &str) -> AppResult<SharedRecipe> {
    let compressed = URL_SAFE_LENIENT
        .decode(encoded.trim())
        .map_err(|e| AppError::Validation(format!("Invalid share link: {}", e)))?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(MAX_INFLATED_BYTES)
        .read_to_end(&mut json)
        .map_err(|e| AppError::Validation(format!("Invalid share link: {}", e)))?;

    serde_json::from_slice(&json)
        .map_err(|e| AppError::Validation(format!("Invalid share link: {}", e)))
}

/// `{base_url}#recipe={payload}`; any existing fragment on `base_url` is dropped.
pub fn build_share_url(base_url: &str, recipe: &Recipe, language: &str) -> AppResult<String> {
    let base = base_url.split('#').next().unwrap_or(base_url);
    let payload = encode_share_payload(recipe, language)?;
    Ok(format!("{}{}{}", base, FRAGMENT_KEY, payload))
}

/// Accepts a full share URL, a `#recipe=...` fragment, or the bare payload.
pub fn extract_share_payload(input: &str) -> &str {
    match input.find(FRAGMENT_KEY) {
        Some(pos) => &input[pos + FRAGMENT_KEY.len()..],
        None => input.strip_prefix("recipe=").unwrap_or(input),
    }
}
