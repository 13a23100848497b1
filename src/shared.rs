pub mod types;
pub mod translatable;
pub mod ui_text;
pub mod settings;
pub mod errors;
pub mod error;
pub mod events;
pub mod emit;

#[cfg(test)]
mod types_test;

// Re-export CommandError for convenience
pub use errors::{CommandError, CommandResult};
pub use error::{AppError, AppResult};
