//! User-facing copy
//!
//! `UiText` holds every label the front end shows, keyed by fixed camelCase
//! names. `UiText::source()` is the canonical English copy; other languages
//! are produced at runtime by sending the copy through the translator and
//! merging the answer back field by field.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::translatable::{TranslatableValue, TranslationPayload};

fn s(text: &str) -> String {
    text.to_string()
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Declares the `UiText` struct together with its key list, its source-language
/// defaults and its typed payload/merge functions, so the three can never drift
/// apart.
macro_rules! ui_text {
    ( $( $field:ident : $ty:ty => $key:literal = $default:expr ),* $(,)? ) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct UiText {
            $(
                #[serde(rename = $key)]
                pub $field: $ty,
            )*
        }

        impl UiText {
            /// Every translatable key, in declaration order.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            /// Canonical copy in the source language.
            pub fn source() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }

            /// Adds every field to a translator payload.
            pub fn write_payload(&self, payload: &mut TranslationPayload) {
                $( payload.insert($key.to_string(), self.$field.to_value()); )*
            }

            /// New copy with each field taken from `response` when present and
            /// well-formed, otherwise kept from `self`.
            pub fn merge_translated(&self, response: &TranslationPayload) -> Self {
                Self {
                    $(
                        $field: <$ty as TranslatableValue>::pick(response, $key)
                            .unwrap_or_else(|| self.$field.clone()),
                    )*
                }
            }
        }
    };
}

ui_text! {
    header_title: String => "headerTitle" = s("Toma"),
    header_subtitle: String => "headerSubtitle" = s("No idea what to cook? Let Toma do the work!"),
    tagline: String => "tagline" = s("Halal Malaysian home cooking from whatever is in your kitchen."),
    input_label: String => "inputLabel" = s("What ingredients do you have?"),
    input_placeholder: String => "inputPlaceholder" = s("e.g., chicken, soy sauce, ginger, garlic..."),
    generate_button: String => "generateButton" = s("Generate Recipe"),
    generate_button_loading: String => "generateButtonLoading" = s("Generating..."),
    reset_button: String => "resetButton" = s("Start Over"),
    recipe_ingredients: String => "recipeIngredients" = s("Ingredients"),
    recipe_instructions: String => "recipeInstructions" = s("Instructions"),
    recipe_prep_time: String => "recipePrepTime" = s("Prep Time"),
    recipe_cook_time: String => "recipeCookTime" = s("Cook Time"),
    recipe_total_time: String => "recipeTotalTime" = s("Total Time"),
    recipe_servings: String => "recipeServings" = s("Servings"),
    export_title: String => "exportTitle" = s("Export Recipe"),
    save_as_text: String => "saveAsText" = s("Save as Text"),
    save_as_image: String => "saveAsImage" = s("Save as Image"),
    save_as_image_saving: String => "saveAsImageSaving" = s("Saving..."),
    share: String => "share" = s("Share"),
    share_copied: String => "shareCopied" = s("Copied!"),
    share_title: String => "shareTitle" = s("Share this Recipe"),
    share_instructions: String => "shareInstructions" = s("Scan the QR code or copy the link below."),
    copy_link_button: String => "copyLinkButton" = s("Copy Link"),
    link_copied_button: String => "linkCopiedButton" = s("Link Copied!"),
    error_prefix: String => "errorPrefix" = s("Failed to generate recipe:"),
    error_ingredients: String => "errorIngredients" = s("Please enter some ingredients."),
    loading_message_recipe: String => "loadingMessageRecipe" = s("Thinking of a delicious recipe..."),
    loading_message_translating: String => "loadingMessageTranslating" = s("Translating..."),
    rating_title: String => "ratingTitle" = s("Rate this Recipe"),
    rating_average: String => "ratingAverage" = s("{rating} out of 5 ({count} ratings)"),
    rating_your_rating: String => "ratingYourRating" = s("Your rating"),
    rating_thank_you: String => "ratingThankYou" = s("Thank you for your rating!"),
    rating_submit: String => "ratingSubmit" = s("Submit Rating"),
    rating_submitting: String => "ratingSubmitting" = s("Submitting..."),
    feedback_button: String => "feedbackButton" = s("Feedback"),
    feedback_title: String => "feedbackTitle" = s("Share Your Feedback"),
    feedback_subtitle: String => "feedbackSubtitle" = s("Tell us how Toma can cook better for you."),
    label_rating: String => "labelRating" = s("Your rating"),
    label_name: String => "labelName" = s("Name"),
    label_email: String => "labelEmail" = s("Email (optional)"),
    label_comment: String => "labelComment" = s("Comment"),
    placeholder_name: String => "placeholderName" = s("Your name"),
    placeholder_email: String => "placeholderEmail" = s("you@example.com"),
    placeholder_comment: String => "placeholderComment" = s("What did you like? What could be better?"),
    submit_feedback_button: String => "submitFeedbackButton" = s("Send Feedback"),
    submitting_feedback: String => "submittingFeedback" = s("Sending..."),
    feedback_success_title: String => "feedbackSuccessTitle" = s("Thank you!"),
    feedback_success_message: String => "feedbackSuccessMessage" = s("Your feedback has been received."),
    close_button: String => "closeButton" = s("Close"),
    generation_counter_text: String => "generationCounterText" = s("recipes generated so far"),
    generation_counter_text_single: String => "generationCounterTextSingle" = s("recipe generated so far"),
    usage_tips: Vec<String> => "usageTips" = list(&[
        "List the ingredients you already have, separated by commas.",
        "Type a dish name like \"rendang\" to get a classic recipe.",
        "Add a few spices for a more aromatic dish.",
        "Switch language at any time; your recipe is translated too.",
    ]),
}

impl Default for UiText {
    fn default() -> Self {
        Self::source()
    }
}

impl UiText {
    /// The "average rating" line, or `None` when nobody has rated yet.
    pub fn rating_average_line(&self, average: f64, count: u64) -> Option<String> {
        if count == 0 {
            return None;
        }
        Some(
            self.rating_average
                .replace("{rating}", &format!("{:.1}", average))
                .replace("{count}", &count.to_string()),
        )
    }

    /// "1,234 recipes generated so far", singular for exactly one.
    pub fn generation_counter_line(&self, count: u64) -> String {
        let label = if count == 1 {
            &self.generation_counter_text_single
        } else {
            &self.generation_counter_text
        };
        format!("{} {}", group_thousands(count), label)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_match_serialized_form() {
        let value = serde_json::to_value(UiText::source()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), UiText::KEYS.len());
        for key in UiText::KEYS {
            assert!(object.contains_key(*key), "missing {}", key);
        }
    }

    #[test]
    fn test_merge_keeps_missing_and_mistyped_keys() {
        let source = UiText::source();
        let mut response = TranslationPayload::new();
        response.insert("headerTitle".to_string(), json!("Toma FR"));
        response.insert("generateButton".to_string(), json!(42));
        response.insert("usageTips".to_string(), json!(["Astuce"]));

        let merged = source.merge_translated(&response);
        assert_eq!(merged.header_title, "Toma FR");
        assert_eq!(merged.generate_button, source.generate_button);
        assert_eq!(merged.input_label, source.input_label);
        assert_eq!(merged.usage_tips, vec!["Astuce".to_string()]);
    }

    #[test]
    fn test_merge_accepts_empty_translation() {
        let mut response = TranslationPayload::new();
        response.insert("tagline".to_string(), json!(""));
        let merged = UiText::source().merge_translated(&response);
        assert_eq!(merged.tagline, "");
    }

    #[test]
    fn test_rating_average_line() {
        let ui = UiText::source();
        assert_eq!(ui.rating_average_line(0.0, 0), None);
        assert_eq!(
            ui.rating_average_line(4.0, 1).as_deref(),
            Some("4.0 out of 5 (1 ratings)")
        );
    }

    #[test]
    fn test_generation_counter_line() {
        let ui = UiText::source();
        assert_eq!(ui.generation_counter_line(1), "1 recipe generated so far");
        assert_eq!(ui.generation_counter_line(1234567), "1,234,567 recipes generated so far");
        assert_eq!(ui.generation_counter_line(999), "999 recipes generated so far");
    }
}
