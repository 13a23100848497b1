use crate::shared::types::Recipe;
use crate::shared::ui_text::UiText;

/// Plain-text rendering of a recipe for "Save as Text", using the active
/// UI copy for headings.
pub fn render_text(recipe: &Recipe, ui_text: &UiText) -> String {
    let mut out = String::new();

    out.push_str(&recipe.recipe_name);
    out.push('\n');
    out.push_str(&"=".repeat(recipe.recipe_name.chars().count().max(3)));
    out.push_str("\n\n");
    out.push_str(&recipe.description);
    out.push_str("\n\n");

    if recipe.has_timing() {
        let timing = [
            (&ui_text.recipe_prep_time, &recipe.prep_time),
            (&ui_text.recipe_cook_time, &recipe.cook_time),
            (&ui_text.recipe_total_time, &recipe.total_time),
            (&ui_text.recipe_servings, &recipe.servings),
        ];
        for (label, value) in timing {
            if let Some(value) = value {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        out.push('\n');
    }

    out.push_str(&ui_text.recipe_ingredients);
    out.push('\n');
    for item in &recipe.ingredients {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');

    out.push_str(&ui_text.recipe_instructions);
    out.push('\n');
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    out
}

/// Suggested file name for the exported text, e.g. `nasi-lemak.txt`.
pub fn text_file_name(recipe: &Recipe) -> String {
    format!("{}.txt", recipe.id)
}
