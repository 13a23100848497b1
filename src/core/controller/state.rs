use serde::Serialize;
use ts_rs::TS;

use crate::shared::types::{LanguageCode, Recipe, SOURCE_LANGUAGE};
use crate::shared::ui_text::UiText;

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppStateSnapshot {
    /// Language picked in the selector.
    pub language: LanguageCode,
    /// Language `ui_text` and `recipe` are currently in. Differs from
    /// `language` only while a translation is in flight.
    pub display_language: LanguageCode,
    pub ui_text: UiText,
    pub recipe: Option<Recipe>,
    pub original_recipe: Option<Recipe>,
    pub is_loading: bool,
    pub is_translating: bool,
    pub loading_message: String,
    pub error: Option<String>,
}

impl Default for AppStateSnapshot {
    fn default() -> Self {
        Self {
            language: SOURCE_LANGUAGE.to_string(),
            display_language: SOURCE_LANGUAGE.to_string(),
            ui_text: UiText::source(),
            recipe: None,
            original_recipe: None,
            is_loading: false,
            is_translating: false,
            loading_message: String::new(),
            error: None,
        }
    }
}

impl AppStateSnapshot {
    /// Average line for the displayed recipe, in the display language.
    pub fn rating_average_line(&self) -> Option<String> {
        let recipe = self.recipe.as_ref()?;
        self.ui_text.rating_average_line(
            recipe.average_rating.unwrap_or(0.0),
            recipe.total_ratings.unwrap_or(0),
        )
    }

    pub(crate) fn clear_recipe(&mut self) {
        self.recipe = None;
        self.original_recipe = None;
    }

    pub(crate) fn clear_progress(&mut self) {
        self.is_loading = false;
        self.is_translating = false;
        self.loading_message.clear();
    }

    /// Ends generation progress, leaving a running translation visible.
    pub(crate) fn finish_loading(&mut self) {
        self.is_loading = false;
        if self.is_translating {
            self.loading_message = self.ui_text.loading_message_translating.clone();
        } else {
            self.loading_message.clear();
        }
    }

    /// Ends translation progress, leaving a running generation visible.
    pub(crate) fn finish_translation(&mut self) {
        self.is_translating = false;
        if self.is_loading {
            self.loading_message = self.ui_text.loading_message_recipe.clone();
        } else {
            self.loading_message.clear();
        }
    }

    /// Copies rating fields from the current original onto a recipe built
    /// from an older copy of it.
    pub(crate) fn carry_ratings(&self, recipe: &mut Recipe) {
        if let Some(original) = self.original_recipe.as_ref().filter(|o| o.id == recipe.id) {
            recipe.average_rating = original.average_rating;
            recipe.total_ratings = original.total_ratings;
            recipe.user_rating = original.user_rating;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{GeneratedRecipe, RatingSummary};

    fn recipe(total: u64) -> Recipe {
        Recipe::compose(
            "kuih".to_string(),
            GeneratedRecipe {
                recipe_name: "Kuih".to_string(),
                description: String::new(),
                ingredients: vec![],
                instructions: vec![],
                prep_time: None,
                cook_time: None,
                total_time: None,
                servings: None,
            },
            RatingSummary { average_rating: 4.4, total_ratings: total },
            None,
        )
    }

    #[test]
    fn test_rating_line_hidden_without_ratings() {
        let mut state = AppStateSnapshot::default();
        assert_eq!(state.rating_average_line(), None);

        state.recipe = Some(recipe(0));
        assert_eq!(state.rating_average_line(), None);

        state.recipe = Some(recipe(3));
        assert_eq!(state.rating_average_line().as_deref(), Some("4.4 out of 5 (3 ratings)"));
    }

    #[test]
    fn test_carry_ratings_matches_on_id() {
        let mut state = AppStateSnapshot::default();
        let mut rated = recipe(1);
        rated.user_rating = Some(4);
        state.original_recipe = Some(rated);

        let mut stale = recipe(0);
        state.carry_ratings(&mut stale);
        assert_eq!(stale.user_rating, Some(4));
        assert_eq!(stale.total_ratings, Some(1));

        let mut other = recipe(0);
        other.id = "other".to_string();
        state.carry_ratings(&mut other);
        assert_eq!(other.user_rating, None);
    }

    #[test]
    fn test_progress_flags_finish_independently() {
        let mut state = AppStateSnapshot {
            is_loading: true,
            is_translating: true,
            ..AppStateSnapshot::default()
        };
        state.finish_translation();
        assert!(state.is_loading);
        assert_eq!(state.loading_message, state.ui_text.loading_message_recipe);

        state.is_translating = true;
        state.finish_loading();
        assert!(!state.is_loading);
        assert_eq!(state.loading_message, state.ui_text.loading_message_translating);

        state.finish_translation();
        assert!(state.loading_message.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let value = serde_json::to_value(AppStateSnapshot::default()).unwrap();
        assert_eq!(value["displayLanguage"], "en");
        assert_eq!(value["isTranslating"], false);
        assert!(value["uiText"]["headerTitle"].is_string());
    }
}
