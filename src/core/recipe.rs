//! Pure recipe transforms: identifier derivation, translation payloads,
//! text export and share links.

pub mod id;
pub mod translation;
pub mod export;
pub mod share;

pub use id::derive_recipe_id;
pub use translation::{build_translation_payload, merge_translated_recipe, split_translation};
