// ABOUTME: Deterministic network-free recipe generator used when no provider result is available
// ABOUTME: Derives title, steps and a naive per-ingredient nutrition estimate from the request alone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

use crate::constants::recipes::{
    CALORIES_PER_INGREDIENT, CARBS_PER_INGREDIENT, FAT_PER_INGREDIENT, GENERIC_TITLE,
    PROTEIN_PER_INGREDIENT,
};
use crate::models::{NutritionInfo, RecipeRequest, RecipeResponse};

/// Round to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the placeholder recipe for `request`. Never fails.
#[must_use]
pub fn placeholder_recipe(request: &RecipeRequest) -> RecipeResponse {
    let ingredients = request.cleaned_ingredients();

    let title = if ingredients.is_empty() {
        GENERIC_TITLE.to_owned()
    } else {
        let lead: Vec<&str> = ingredients.iter().take(2).map(String::as_str).collect();
        format!("Quick {} Dish", lead.join(" & "))
    };

    let steps = vec![
        format!("Prepare the following ingredients: {}.", ingredients.join(", ")),
        "Combine ingredients in a pan and cook for 8-12 minutes, adjust seasoning to taste."
            .to_owned(),
        "Serve hot.".to_owned(),
    ];

    let count = ingredients.len();
    let count_f = count as f64;
    let nutrition = NutritionInfo {
        calories: i64::try_from(count)
            .unwrap_or(i64::MAX)
            .saturating_mul(CALORIES_PER_INGREDIENT),
        protein_grams: round_one_decimal(count_f * PROTEIN_PER_INGREDIENT),
        fat_grams: round_one_decimal(count_f * FAT_PER_INGREDIENT),
        carbs_grams: round_one_decimal(count_f * CARBS_PER_INGREDIENT),
    };

    RecipeResponse {
        title,
        description: None,
        ingredients,
        steps,
        nutrition: Some(nutrition),
        image_url: None,
        image_description: None,
        servings: request.resolved_servings(),
    }
}
