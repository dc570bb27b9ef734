// ABOUTME: Provider-agnostic prompt builder for recipe generation
// ABOUTME: Renders ingredients, dietary constraints and servings under a fixed JSON output schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Prompt construction for recipe generation.
//!
//! The prompt is pure text: no provider knows how it was built and the same
//! request always renders the same prompt. Absent optional values are left
//! out rather than rendered as `null`.

use std::fmt::Write;

use crate::models::{Preferences, RecipeRequest};

/// Instruction preceding the output schema
const SYSTEM_INSTRUCTION: &str = "You are a helpful chef assistant. Given the list of ingredients \
and optional preferences, invent a recipe and return the result as JSON exactly in the following schema:";

/// Output schema the model is asked to fill
const OUTPUT_SCHEMA: &str = r#"{
  "Title": "...",
  "Description": "...",
  "Ingredients": ["..."],
  "Steps": ["..."],
  "Nutrition": { "Calories": 0, "ProteinGrams": 0.0, "FatGrams": 0.0, "CarbsGrams": 0.0 },
  "ImageDescription": "...",
  "Servings": 1
}"#;

/// Closing guidance on content
const CONTENT_GUIDANCE: &str = "Create a realistic set of steps and a simple nutrition estimate.";

/// Closing guidance on format
const JSON_ONLY_INSTRUCTION: &str = "Respond with JSON only, without additional explanation.";

/// Build the generation prompt for a recipe request
#[must_use]
pub fn build_recipe_prompt(request: &RecipeRequest) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(SYSTEM_INSTRUCTION);
    prompt.push('\n');
    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push_str("\n\n");

    prompt.push_str("Ingredients:\n");
    for ingredient in request
        .ingredients
        .iter()
        .filter(|ingredient| !ingredient.trim().is_empty())
    {
        // Writing to a String cannot fail
        let _ = writeln!(prompt, "- {ingredient}");
    }

    if let Some(constraints) = request
        .preferences
        .as_ref()
        .filter(|preferences| preferences.has_constraints())
    {
        prompt.push('\n');
        render_constraints(&mut prompt, constraints);
    }

    let _ = write!(prompt, "\nServings: {}\n\n", request.resolved_servings());

    prompt.push_str(CONTENT_GUIDANCE);
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt.push('\n');

    prompt
}

/// Render the active dietary flags and calorie ceiling
fn render_constraints(prompt: &mut String, preferences: &Preferences) {
    prompt.push_str("Dietary constraints:\n");
    if preferences.vegetarian {
        prompt.push_str("- Vegetarian\n");
    }
    if preferences.vegan {
        prompt.push_str("- Vegan\n");
    }
    if preferences.gluten_free {
        prompt.push_str("- Gluten-free\n");
    }
    if let Some(max_calories) = preferences.max_calories {
        let _ = writeln!(prompt, "- Maximum calories: {max_calories}");
    }
}
