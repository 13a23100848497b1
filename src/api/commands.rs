//! Command modules, one per feature area (no mod.rs pattern).
//!
//! - `recipe`: generation, language, reset, export and share
//! - `rating`: star ratings
//! - `feedback`: feedback form, admin listing, usage counter
//! - `settings`: settings persistence

pub mod recipe;
pub mod rating;
pub mod feedback;
pub mod settings;
