//! Recipe command module
//!
//! Generation, language switching, reset, export and share links.

use crate::app::AppContext;
use crate::core::controller::AppStateSnapshot;
use crate::core::recipe::export::text_file_name;
use crate::shared::errors::CommandResult;
use crate::shared::types::{ExportedText, Language, LANGUAGES};

/// Current controller state
pub fn get_state(ctx: &AppContext) -> AppStateSnapshot {
    ctx.controller.snapshot()
}

/// Languages offered by the selector
pub fn get_languages() -> Vec<Language> {
    LANGUAGES.to_vec()
}

/// Generate a recipe from free-text ingredients. Generation failures end up
/// in the returned state's `error`, not in the command result.
pub async fn generate_recipe(ctx: &AppContext, ingredients: String) -> CommandResult<AppStateSnapshot> {
    Ok(ctx.controller.generate_recipe(&ingredients).await)
}

pub async fn change_language(ctx: &AppContext, code: String) -> CommandResult<AppStateSnapshot> {
    Ok(ctx.controller.change_language(&code).await?)
}

pub fn reset_recipe(ctx: &AppContext) -> CommandResult<AppStateSnapshot> {
    Ok(ctx.controller.reset())
}

/// Displayed recipe as a text file, `None` when nothing is shown.
pub fn export_recipe_text(ctx: &AppContext) -> CommandResult<Option<ExportedText>> {
    let content = match ctx.controller.export_text() {
        Some(content) => content,
        None => return Ok(None),
    };
    let file_name = ctx
        .controller
        .snapshot()
        .recipe
        .as_ref()
        .map(text_file_name)
        .unwrap_or_else(|| "recipe.txt".to_string());
    Ok(Some(ExportedText { file_name, content }))
}

pub fn share_recipe_link(ctx: &AppContext, base_url: String) -> CommandResult<Option<String>> {
    Ok(ctx.controller.share_link(&base_url)?)
}

/// Open a share link, `#recipe=` fragment or bare payload.
pub async fn open_shared_recipe(ctx: &AppContext, link: String) -> CommandResult<AppStateSnapshot> {
    Ok(ctx.controller.open_shared_recipe(&link).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::fakes::Kitchen;
    use crate::shared::errors::CommandError;
    use std::path::PathBuf;

    fn context() -> (Kitchen, AppContext) {
        let kitchen = Kitchen::new();
        let ctx = AppContext::for_tests(&kitchen, PathBuf::from("settings.json"));
        (kitchen, ctx)
    }

    #[tokio::test]
    async fn test_generate_and_export() {
        let (_kitchen, ctx) = context();
        assert_eq!(export_recipe_text(&ctx).unwrap(), None);

        let state = generate_recipe(&ctx, "chicken".to_string()).await.unwrap();
        assert!(state.recipe.is_some());

        let exported = export_recipe_text(&ctx).unwrap().unwrap();
        assert_eq!(exported.file_name, "golden-ginger-soy-chicken.txt");
        assert!(exported.content.contains("1. Marinate the chicken."));
    }

    #[tokio::test]
    async fn test_unknown_language_maps_to_invalid_input() {
        let (_kitchen, ctx) = context();
        let err = change_language(&ctx, "xx".to_string()).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_share_then_open() {
        let (_kitchen, ctx) = context();
        generate_recipe(&ctx, "chicken".to_string()).await.unwrap();
        let link = share_recipe_link(&ctx, "https://toma.app".to_string()).unwrap().unwrap();

        reset_recipe(&ctx).unwrap();
        assert!(get_state(&ctx).recipe.is_none());

        let state = open_shared_recipe(&ctx, link).await.unwrap();
        assert_eq!(state.recipe.unwrap().id, "golden-ginger-soy-chicken");
    }

    #[test]
    fn test_languages_start_with_source() {
        let languages = get_languages();
        assert_eq!(languages.len(), 7);
        assert_eq!(languages[0].code, "en");
    }
}
