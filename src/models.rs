// ABOUTME: Recipe request/response data model shared by routes, prompt builder and normalizer
// ABOUTME: Decodes case-insensitively and leniently, serializes camelCase with absent options omitted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Recipe Data Model
//!
//! All types are request-scoped; nothing here is persisted.
//!
//! Decoding goes through [`crate::utils::json::fold_keys`], so every
//! deserialize name below is the lowercase form of the field. Serialization
//! uses camelCase.

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::json::{from_value_case_insensitive, null_as_default};

const fn default_servings() -> i32 {
    1
}

/// Coerce a requested serving count to at least one
#[must_use]
pub const fn coerce_servings(servings: i32) -> i32 {
    if servings <= 0 {
        1
    } else {
        servings
    }
}

/// Accept integer or decimal calories, rounding decimals to the nearest integer
fn lenient_calories<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map_or(0, |calories| calories.round() as i64))
}

// ============================================================================
// Request
// ============================================================================

/// Dietary preferences attached to a recipe request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Vegetarian recipe requested
    #[serde(default, deserialize_with = "null_as_default")]
    pub vegetarian: bool,
    /// Vegan recipe requested
    #[serde(default, deserialize_with = "null_as_default")]
    pub vegan: bool,
    /// Gluten-free recipe requested
    #[serde(
        default,
        rename(serialize = "glutenFree", deserialize = "glutenfree"),
        alias = "gluten_free",
        deserialize_with = "null_as_default"
    )]
    pub gluten_free: bool,
    /// Optional upper bound on calories
    #[serde(
        default,
        rename(serialize = "maxCalories", deserialize = "maxcalories"),
        alias = "max_calories",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_calories: Option<i32>,
}

impl Preferences {
    /// Whether any dietary flag or calorie ceiling is set
    #[must_use]
    pub const fn has_constraints(&self) -> bool {
        self.vegetarian || self.vegan || self.gluten_free || self.max_calories.is_some()
    }
}

/// Inbound request for a generated recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Ingredients to cook with; order is irrelevant to generation
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    /// Optional dietary preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    /// Requested serving count; values at or below zero mean one
    #[serde(default = "default_servings", deserialize_with = "null_as_default")]
    pub servings: i32,
}

impl RecipeRequest {
    /// Create a request for one serving with no preferences
    #[must_use]
    pub const fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            preferences: None,
            servings: 1,
        }
    }

    /// Attach dietary preferences
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Set the requested serving count
    #[must_use]
    pub const fn with_servings(mut self, servings: i32) -> Self {
        self.servings = servings;
        self
    }

    /// Decode a request body with case-insensitive field names
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the value does not describe a request.
    pub fn from_json_value(value: serde_json::Value) -> serde_json::Result<Self> {
        from_value_case_insensitive(value)
    }

    /// Whether the request carries at least one ingredient entry
    #[must_use]
    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }

    /// Serving count coerced to at least one
    #[must_use]
    pub const fn resolved_servings(&self) -> i32 {
        coerce_servings(self.servings)
    }

    /// Ingredients trimmed, with empty entries removed, order preserved
    #[must_use]
    pub fn cleaned_ingredients(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|ingredient| ingredient.trim())
            .filter(|ingredient| !ingredient.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

// ============================================================================
// Response
// ============================================================================

/// Nutrition estimate for a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    /// Total calories
    #[serde(default, deserialize_with = "lenient_calories")]
    pub calories: i64,
    /// Protein in grams
    #[serde(
        default,
        rename(serialize = "proteinGrams", deserialize = "proteingrams"),
        deserialize_with = "null_as_default"
    )]
    pub protein_grams: f64,
    /// Fat in grams
    #[serde(
        default,
        rename(serialize = "fatGrams", deserialize = "fatgrams"),
        deserialize_with = "null_as_default"
    )]
    pub fat_grams: f64,
    /// Carbohydrates in grams
    #[serde(
        default,
        rename(serialize = "carbsGrams", deserialize = "carbsgrams"),
        deserialize_with = "null_as_default"
    )]
    pub carbs_grams: f64,
}

/// A generated recipe returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe title; never empty once it leaves the generator
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Optional short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ingredient lines, in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    /// Preparation steps, in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    /// Optional nutrition estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,
    /// Optional image reference
    #[serde(
        default,
        rename(serialize = "imageUrl", deserialize = "imageurl"),
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Optional textual description of a picture of the dish
    #[serde(
        default,
        rename(serialize = "imageDescription", deserialize = "imagedescription"),
        skip_serializing_if = "Option::is_none"
    )]
    pub image_description: Option<String>,
    /// Serving count
    #[serde(default = "default_servings", deserialize_with = "null_as_default")]
    pub servings: i32,
}

impl RecipeResponse {
    /// Whether the recipe carries a non-blank title
    #[must_use]
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::json::from_value_case_insensitive;
    use serde_json::json;

    #[test]
    fn test_request_decodes_any_casing_and_nulls() {
        let request = RecipeRequest::from_json_value(json!({
            "INGREDIENTS": ["egg"],
            "Preferences": { "GlutenFree": true, "vegan": null },
            "Servings": null
        }))
        .unwrap();

        assert_eq!(request.ingredients, vec!["egg"]);
        let preferences = request.preferences.unwrap();
        assert!(preferences.gluten_free);
        assert!(!preferences.vegan);
        assert_eq!(request.servings, 0);
        assert_eq!(coerce_servings(request.servings), 1);
    }

    #[test]
    fn test_missing_servings_defaults_to_one() {
        let request = RecipeRequest::from_json_value(json!({ "ingredients": ["egg"] })).unwrap();
        assert_eq!(request.servings, 1);
    }

    #[test]
    fn test_response_serializes_camel_case_without_absent_fields() {
        let recipe = RecipeResponse {
            title: "Soup".into(),
            description: None,
            ingredients: vec!["leek".into()],
            steps: vec!["Simmer".into()],
            nutrition: Some(NutritionInfo {
                calories: 100,
                protein_grams: 1.5,
                fat_grams: 0.0,
                carbs_grams: 20.0,
            }),
            image_url: None,
            image_description: Some("A bowl".into()),
            servings: 2,
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["imageDescription"], "A bowl");
        assert_eq!(value["nutrition"]["proteinGrams"], 1.5);
        assert!(value.get("description").is_none());
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_decimal_calories_round() {
        let nutrition: NutritionInfo =
            from_value_case_insensitive(json!({ "Calories": 449.5, "CarbsGrams": null })).unwrap();
        assert_eq!(nutrition.calories, 450);
        assert!(nutrition.carbs_grams.abs() < f64::EPSILON);
    }
}
