//! Remote service seams
//!
//! The controller only talks to these traits. Production implementations
//! live in `gemini` (generation + translation) and `supabase` (ratings,
//! feedback and usage counters); tests plug in in-memory fakes.

pub mod prompts;
pub mod gemini;
pub mod supabase;

use async_trait::async_trait;

use crate::shared::error::AppResult;
use crate::shared::translatable::TranslationPayload;
use crate::shared::types::{FeedbackData, FeedbackItem, GeneratedRecipe, RatingSummary, UpsertRatingPayload};

pub use gemini::GeminiClient;
pub use supabase::SupabaseClient;

/// Turns free-text ingredients into a recipe.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// `AppError::Network` when the service could not be reached,
    /// `AppError::Parse` when it answered with something that is not a recipe.
    async fn generate_recipe(&self, ingredients: &str) -> AppResult<GeneratedRecipe>;
}

/// Translates every string value of a flat object, keys untouched.
#[async_trait]
pub trait ContentTranslator: Send + Sync {
    async fn translate_content(
        &self,
        content: &TranslationPayload,
        language_name: &str,
    ) -> AppResult<TranslationPayload>;
}

/// Per-recipe aggregate and per-user ratings.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// `{0, 0}` when the recipe has never been rated.
    async fn rating_summary(&self, recipe_id: &str) -> AppResult<RatingSummary>;

    async fn user_rating(&self, recipe_id: &str, user_id: &str) -> AppResult<Option<u8>>;

    /// Insert or overwrite the row keyed by (recipe_id, user_id).
    async fn upsert_rating(&self, payload: &UpsertRatingPayload) -> AppResult<()>;
}

/// Feedback submissions and usage events.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn submit_feedback(&self, user_id: &str, feedback: &FeedbackData) -> AppResult<()>;

    /// Newest first.
    async fn list_feedback(&self) -> AppResult<Vec<FeedbackItem>>;

    async fn record_generation(&self, user_id: &str) -> AppResult<()>;

    async fn generation_count(&self) -> AppResult<u64>;
}
