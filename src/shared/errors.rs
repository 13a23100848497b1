//! Command boundary errors
//!
//! `CommandError` is what the command layer hands to a front end. It is
//! serialized as `{ "type": ..., "message": ... }` so the UI can branch on
//! the category without parsing display strings.

use thiserror::Error;
use serde::Serialize;
use ts_rs::TS;

use super::error::AppError;

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "type", content = "message")]
#[ts(export)]
pub enum CommandError {
    /// Invalid input or parameter; nothing was sent anywhere
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network/API error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A remote service returned something unreadable
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Local persistence failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Missing or broken configuration (API keys, URLs)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unknown/unexpected error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Io(msg) => CommandError::StorageError(msg),
            AppError::Network(msg) => CommandError::NetworkError(msg),
            AppError::Parse(msg) => CommandError::MalformedResponse(msg),
            AppError::Validation(msg) => CommandError::InvalidInput(msg),
            AppError::Storage(msg) => CommandError::StorageError(msg),
            AppError::Config(msg) => CommandError::ConfigError(msg),
            AppError::Unknown(msg) => CommandError::Unknown(msg),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

// User-facing messages shared between services and the controller.
pub const ERR_GENERATION_NETWORK: &str = "Could not get a recipe from the kitchen. Please try again.";
pub const ERR_GENERATION_MALFORMED: &str = "The kitchen returned a malformed recipe card. Please try again.";
pub const ERR_TRANSLATION_FAILED: &str = "Failed to translate content. Please try a different language.";
pub const ERR_TRANSLATION_PREFIX: &str = "Translation failed:";
pub const ERR_RATING_SUBMIT: &str = "Could not submit your rating.";
pub const ERR_RATING_RANGE: &str = "Rating must be between 1 and 5 stars.";
pub const ERR_FEEDBACK_SUBMIT: &str = "Failed to send feedback. Please try again shortly.";
pub const ERR_ADMIN_PIN: &str = "Wrong PIN!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_tagged_object() {
        let err = CommandError::InvalidInput("Please enter some ingredients.".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "InvalidInput");
        assert_eq!(json["message"], "Please enter some ingredients.");
    }

    #[test]
    fn test_from_app_error_keeps_category() {
        let err: CommandError = AppError::Parse("bad json".to_string()).into();
        assert_eq!(err, CommandError::MalformedResponse("bad json".to_string()));
    }
}
