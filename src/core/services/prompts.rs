use crate::shared::translatable::TranslationPayload;

pub fn recipe_prompt(ingredients: &str) -> String {
    format!(
        r#"You are an expert Malaysian home cook, passionate about creating authentic and delicious local dishes. Your primary task is to analyze the provided ingredients (or dish name) and determine the **most logical and delicious type of Malaysian dish** to create. Use your culinary judgment.

**Provided Ingredients:**
{ingredients}

**Strict Requirements:**
1.  **Context is Key - Choose the Right Dish Type:**
    *   Analyze the ingredients first. Do they suggest a savory main course, a sweet snack, a dessert, or a drink?
    *   **If savory** (e.g., chicken, fish, vegetables, spices), create a 'lauk-pauk' (a main or side dish) that is typically eaten with rice. Consider Malaysian cooking styles like 'tumis', 'gulai', 'masak lemak', 'sambal', 'sup', 'bakar' or 'kukus'.
    *   **If sweet** (e.g., flour, coconut, sugar, palm sugar), create a 'kuih-muih', 'cucur' or a dessert. Do NOT classify these as a 'lauk' for rice.
    *   **Use common sense:** Avoid illogical combinations.

2.  **Strictly Halal:** The recipe MUST be 100% halal. No pork, alcohol, or any non-halal ingredients or methods.

3.  **Creative & Appealing Name:** Devise a creative and appealing name for the dish in English. Do not just list the ingredients.

4.  **Practical for Home Cooks:** Instructions must be clear, step-by-step, and easy to follow.

5.  **Language:** The recipe and all text must be in **English**.

**Output Format:**
You MUST respond with ONLY a single JSON object that strictly adheres to the following structure. Do not include any text, explanations, or markdown formatting before or after the JSON object.

{{
  "recipeName": "string",
  "description": "string (2-3 enticing sentences)",
  "prepTime": "string (e.g. '15 minutes')",
  "cookTime": "string",
  "totalTime": "string",
  "servings": "string (e.g. '4 people')",
  "ingredients": ["string", "string", ...],
  "instructions": ["string", "string", ...]
}}"#,
        ingredients = ingredients.trim()
    )
}

pub fn translation_prompt(content: &TranslationPayload, language_name: &str) -> String {
    let json = serde_json::to_string_pretty(content).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Translate all string values in the following JSON object to {language_name}. \
Do not translate keys. Respond with only the translated JSON object, maintaining the exact same \
structure and keys. If a value is an array of strings, translate each string in the array. \
Keep placeholders such as {{rating}} and {{count}} unchanged.\n\nJSON to translate:\n{json}"
    )
}
