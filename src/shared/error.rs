use thiserror::Error;
use serde::Serialize;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Network Error: {0}")]
    Network(String),

    /// Remote service answered, but not with something we can read.
    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

impl AppError {
    /// The bare message without the category prefix, suitable for
    /// composing user-facing error lines.
    pub fn message(&self) -> &str {
        match self {
            AppError::Io(msg)
            | AppError::Network(msg)
            | AppError::Parse(msg)
            | AppError::Validation(msg)
            | AppError::Storage(msg)
            | AppError::Config(msg)
            | AppError::Unknown(msg) => msg,
        }
    }

    /// Message for display, falling back to a generic line when the
    /// underlying error carried no text.
    pub fn user_message(&self) -> String {
        let msg = self.message().trim();
        if msg.is_empty() {
            "An unknown error occurred.".to_string()
        } else {
            msg.to_string()
        }
    }
}

// Implement conversion from standard errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("Serialization error: {}", err))
    }
}

impl From<redb::Error> for AppError {
    fn from(err: redb::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(err: redb::DatabaseError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(err: redb::TransactionError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::TableError> for AppError {
    fn from(err: redb::TableError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(err: redb::StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(err: redb::CommitError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Unknown(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Unknown(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
