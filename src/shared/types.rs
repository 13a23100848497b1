use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use chrono::{DateTime, Utc};

pub type LanguageCode = String;

/// A display language offered by the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Language {
    #[ts(type = "string")]
    pub code: &'static str,
    /// Native display name, also the name handed to the translator.
    #[ts(type = "string")]
    pub name: &'static str,
}

/// Language recipes are generated in and translated from.
pub const SOURCE_LANGUAGE: &str = "en";

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "ms", name: "Bahasa Melayu" },
    Language { code: "es", name: "Español" },
    Language { code: "fr", name: "Français" },
    Language { code: "zh", name: "中文 (Mandarin)" },
    Language { code: "hi", name: "हिन्दी (Hindi)" },
    Language { code: "ar", name: "العربية (Arabic)" },
];

pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

pub fn is_source_language(code: &str) -> bool {
    code == SOURCE_LANGUAGE
}

/// Recipe exactly as the generator returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneratedRecipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub servings: Option<String>,
}

/// Models occasionally answer `"servings": 4` instead of `"4"`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A generated recipe joined with its rating data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Recipe {
    pub id: String,
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ratings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

impl Recipe {
    pub fn compose(
        id: String,
        generated: GeneratedRecipe,
        summary: RatingSummary,
        user_rating: Option<u8>,
    ) -> Self {
        Self {
            id,
            recipe_name: generated.recipe_name,
            description: generated.description,
            ingredients: generated.ingredients,
            instructions: generated.instructions,
            prep_time: generated.prep_time,
            cook_time: generated.cook_time,
            total_time: generated.total_time,
            servings: generated.servings,
            average_rating: Some(summary.average_rating),
            total_ratings: Some(summary.total_ratings),
            user_rating,
        }
    }

    /// Rating fields replaced, everything else kept.
    pub fn with_rating(&self, summary: RatingSummary, user_rating: u8) -> Self {
        Self {
            average_rating: Some(summary.average_rating),
            total_ratings: Some(summary.total_ratings),
            user_rating: Some(user_rating),
            ..self.clone()
        }
    }

    /// Once a user has rated, the rating control is read-only.
    pub fn has_user_rating(&self) -> bool {
        self.user_rating.is_some_and(|r| r > 0)
    }

    pub fn has_timing(&self) -> bool {
        self.prep_time.is_some()
            || self.cook_time.is_some()
            || self.total_time.is_some()
            || self.servings.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_ratings: u64,
}

/// Row written to the rating store. Unique per (recipe_id, user_id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertRatingPayload {
    pub recipe_id: String,
    pub recipe_name: String,
    pub user_id: String,
    pub rating: u8,
    pub language_code: String,
    pub ingredients: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedbackData {
    pub rating: u8,
    pub name: String,
    pub email: String,
    pub comment: String,
}

/// Stored feedback row as returned by the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedbackItem {
    pub id: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitRatingRequest {
    pub recipe_id: String,
    pub rating: u8,
}

/// "Save as Text" result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportedText {
    pub file_name: String,
    pub content: String,
}
