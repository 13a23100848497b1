use std::sync::OnceLock;
use regex::Regex;

/// Slug joining a recipe to its rating aggregate.
///
/// Trimmed, lower-cased, each whitespace run collapsed to one hyphen. Two
/// different ingredient lists that yield the same dish name share an id and
/// therefore share ratings.
pub fn derive_recipe_id(recipe_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));

    re.replace_all(recipe_name.trim().to_lowercase().as_str(), "-")
        .into_owned()
}
