// ABOUTME: Layered response normalizer turning raw provider output into a valid recipe
// ABOUTME: Direct schema, provider envelope and embedded JSON layers with first-match-wins semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Response Normalizer
//!
//! Upstream text generation is unreliable in format. The normalizer runs an
//! ordered list of [`ExtractionLayer`]s over the response body:
//!
//! | Layer | On hit |
//! |---|---|
//! | [`DirectSchema`] | body decodes as a recipe with a non-empty title |
//! | [`ProviderEnvelope`] | replaces the working text with the wrapped model output |
//! | [`EmbeddedJson`] | `{ ... }` span of the working text decodes as a recipe |
//!
//! A layer yields a recipe, a replacement text, or no match; the first
//! recipe wins. When nothing matches, the working text is wrapped into a
//! degraded result so the bytes the provider returned are never discarded.
//! A non-success status short-circuits before any parsing.

use http::StatusCode;
use serde_json::Value;

use crate::constants::recipes::AI_FALLBACK_TITLE;
use crate::models::{RecipeRequest, RecipeResponse};
use crate::utils::json::from_value_case_insensitive;

// ============================================================================
// Layer Contract
// ============================================================================

/// Result of running one extraction layer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerOutcome {
    /// The layer produced a structured recipe; stop here
    Recipe(RecipeResponse),
    /// The layer unwrapped the model output; later layers see this text instead
    Text(String),
    /// Nothing recognised; later layers see the same text
    NoMatch,
}

/// One attempt at recognising a response shape
pub trait ExtractionLayer: Send + Sync {
    /// Layer name used in logs and results
    fn name(&self) -> &'static str;

    /// Inspect the current working text
    fn extract(&self, text: &str) -> LayerOutcome;
}

/// Decode `text` as a recipe only when it is a JSON object
///
/// Serde's derived struct visitor also fills fields by position from a JSON
/// array; provider bodies like `["prose"]` must not decode that way.
fn decode_recipe_object(text: &str) -> Option<RecipeResponse> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| from_value_case_insensitive::<RecipeResponse>(value).ok())
}

/// Step 2: the body is already a recipe object
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSchema;

impl ExtractionLayer for DirectSchema {
    fn name(&self) -> &'static str {
        "direct_schema"
    }

    fn extract(&self, text: &str) -> LayerOutcome {
        // Structurally compatible wrappers decode with an empty title; those are not recipes
        match decode_recipe_object(text) {
            Some(recipe) if recipe.has_title() => LayerOutcome::Recipe(recipe),
            _ => LayerOutcome::NoMatch,
        }
    }
}

/// Step 3: a known provider wrapper around the model's text
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderEnvelope;

impl ProviderEnvelope {
    /// Text of the first candidate: `output`, then `content.parts[]`, then `text`
    fn candidate_text(candidate: &Value) -> Option<String> {
        if let Some(output) = candidate.get("output").and_then(Value::as_str) {
            return Some(output.to_owned());
        }

        if let Some(parts) = candidate.pointer("/content/parts").and_then(Value::as_array) {
            let joined: String = parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(text) => Some(text.as_str()),
                    other => other.get("text").and_then(Value::as_str),
                })
                .collect();
            if !joined.is_empty() {
                return Some(joined);
            }
        }

        candidate
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn unwrap_value(root: &Value) -> Option<String> {
        // Hugging Face answers with `[{"generated_text": ...}]`
        let root = match root {
            Value::Array(items) => items.first()?,
            other => other,
        };

        let from_candidates = root
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
            .and_then(Self::candidate_text);

        from_candidates.or_else(|| {
            ["generated_text", "output"]
                .iter()
                .find_map(|key| root.get(*key).and_then(Value::as_str))
                .map(str::to_owned)
        })
    }
}

impl ExtractionLayer for ProviderEnvelope {
    fn name(&self) -> &'static str {
        "provider_envelope"
    }

    fn extract(&self, text: &str) -> LayerOutcome {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|root| Self::unwrap_value(&root))
            .map_or(LayerOutcome::NoMatch, LayerOutcome::Text)
    }
}

/// Step 4: a JSON object embedded in prose or markdown fences
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedJson;

impl EmbeddedJson {
    /// Span from the first `{` to the last `}`, inclusive
    fn object_span(text: &str) -> Option<&str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        (start < end).then(|| &text[start..=end])
    }
}

impl ExtractionLayer for EmbeddedJson {
    fn name(&self) -> &'static str {
        "embedded_json"
    }

    fn extract(&self, text: &str) -> LayerOutcome {
        Self::object_span(text)
            .and_then(decode_recipe_object)
            .map_or(LayerOutcome::NoMatch, LayerOutcome::Recipe)
    }
}

// ============================================================================
// Normalizer
// ============================================================================

/// Outcome of normalizing one upstream response
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// A layer produced a structured recipe (already repaired)
    Structured {
        /// The recipe
        recipe: RecipeResponse,
        /// Name of the layer that matched
        layer: &'static str,
    },
    /// No layer matched; the working text is wrapped as a single step
    Degraded(RecipeResponse),
    /// Upstream answered with a non-success status; nothing was parsed
    Rejected {
        /// Status returned upstream
        status: StatusCode,
    },
}

/// Ordered extraction pipeline
pub struct ResponseNormalizer {
    layers: Vec<Box<dyn ExtractionLayer>>,
}

impl ResponseNormalizer {
    /// Create a normalizer with an explicit layer order
    #[must_use]
    pub fn with_layers(layers: Vec<Box<dyn ExtractionLayer>>) -> Self {
        Self { layers }
    }

    /// Names of the configured layers, in order
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Normalize an upstream response for `request`
    #[must_use]
    pub fn normalize(&self, status: StatusCode, body: &str, request: &RecipeRequest) -> Normalized {
        if !status.is_success() {
            return Normalized::Rejected { status };
        }

        let mut working_text = body.to_owned();
        for layer in &self.layers {
            match layer.extract(&working_text) {
                LayerOutcome::Recipe(recipe) => {
                    return Normalized::Structured {
                        recipe: repair(recipe, request),
                        layer: layer.name(),
                    };
                }
                LayerOutcome::Text(text) => working_text = text,
                LayerOutcome::NoMatch => {}
            }
        }

        Normalized::Degraded(degraded_recipe(working_text, request))
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::with_layers(vec![
            Box::new(DirectSchema),
            Box::new(ProviderEnvelope),
            Box::new(EmbeddedJson),
        ])
    }
}

impl std::fmt::Debug for ResponseNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseNormalizer")
            .field("layers", &self.layer_names())
            .finish()
    }
}

/// Wrap unparseable provider text as a single-step recipe
#[must_use]
pub fn degraded_recipe(text: String, request: &RecipeRequest) -> RecipeResponse {
    RecipeResponse {
        title: AI_FALLBACK_TITLE.to_owned(),
        description: None,
        ingredients: request.ingredients.clone(),
        steps: vec![text],
        nutrition: None,
        image_url: None,
        image_description: None,
        servings: request.resolved_servings(),
    }
}

/// Bring a structured parse in line with the response guarantees
///
/// A well-formed recipe passes through unchanged.
#[must_use]
pub fn repair(mut recipe: RecipeResponse, request: &RecipeRequest) -> RecipeResponse {
    if !recipe.has_title() {
        AI_FALLBACK_TITLE.clone_into(&mut recipe.title);
    }
    if recipe.ingredients.is_empty() {
        recipe.ingredients.clone_from(&request.ingredients);
    }
    if recipe.servings <= 0 {
        recipe.servings = request.resolved_servings();
    }
    if let Some(nutrition) = recipe.nutrition.as_mut() {
        nutrition.calories = nutrition.calories.max(0);
        for grams in [
            &mut nutrition.protein_grams,
            &mut nutrition.fat_grams,
            &mut nutrition.carbs_grams,
        ] {
            if grams.is_sign_negative() || grams.is_nan() {
                *grams = 0.0;
            }
        }
    }
    recipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> RecipeRequest {
        RecipeRequest::new(vec!["egg".into(), " rice ".into()]).with_servings(0)
    }

    #[test]
    fn test_envelope_reads_candidate_parts_in_order() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"Title\":" }, "\"X\"}"] } }]
        })
        .to_string();

        assert_eq!(
            ProviderEnvelope.extract(&body),
            LayerOutcome::Text("{\"Title\":\"X\"}".to_owned())
        );
    }

    #[test]
    fn test_envelope_prefers_candidate_output() {
        let body = json!({ "candidates": [{ "output": "first", "text": "second" }] }).to_string();
        assert_eq!(ProviderEnvelope.extract(&body), LayerOutcome::Text("first".to_owned()));
    }

    #[test]
    fn test_envelope_reads_array_root() {
        let body = json!([{ "generated_text": "hello" }]).to_string();
        assert_eq!(ProviderEnvelope.extract(&body), LayerOutcome::Text("hello".to_owned()));
    }

    #[test]
    fn test_envelope_ignores_unknown_shapes() {
        assert_eq!(ProviderEnvelope.extract("{\"answer\":\"no\"}"), LayerOutcome::NoMatch);
        assert_eq!(ProviderEnvelope.extract("plain prose"), LayerOutcome::NoMatch);
    }

    #[test]
    fn test_direct_schema_rejects_empty_title() {
        assert_eq!(DirectSchema.extract("{\"Steps\":[\"a\"]}"), LayerOutcome::NoMatch);
    }

    #[test]
    fn test_direct_schema_rejects_positional_array() {
        assert_eq!(
            DirectSchema.extract(r#"["Boil the rice and add a fried egg."]"#),
            LayerOutcome::NoMatch
        );
        assert_eq!(
            DirectSchema.extract(r#"["Sure, here is text","more"]"#),
            LayerOutcome::NoMatch
        );
    }

    #[test]
    fn test_array_of_prose_degrades_with_body_as_step() {
        let body = r#"["Boil the rice and add a fried egg."]"#;
        let normalized = ResponseNormalizer::default().normalize(StatusCode::OK, body, &request());
        let Normalized::Degraded(recipe) = normalized else {
            panic!("expected degraded result, got {normalized:?}");
        };
        assert_eq!(recipe.title, AI_FALLBACK_TITLE);
        assert_eq!(recipe.steps, vec![body]);
        assert_eq!(recipe.ingredients, vec!["egg", " rice "]);
    }

    #[test]
    fn test_embedded_json_accepts_untitled_object() {
        let outcome = EmbeddedJson.extract("Here you go:\n```json\n{\"steps\":[\"boil\"]}\n```");
        match outcome {
            LayerOutcome::Recipe(recipe) => assert_eq!(recipe.steps, vec!["boil"]),
            other => panic!("expected recipe, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_json_needs_ordered_braces() {
        assert_eq!(EmbeddedJson.extract("} nothing {"), LayerOutcome::NoMatch);
    }

    #[test]
    fn test_rejected_status_skips_parsing() {
        let normalized = ResponseNormalizer::default().normalize(
            StatusCode::SERVICE_UNAVAILABLE,
            "{\"Title\":\"ignored\"}",
            &request(),
        );
        assert_eq!(
            normalized,
            Normalized::Rejected {
                status: StatusCode::SERVICE_UNAVAILABLE
            }
        );
    }

    #[test]
    fn test_degraded_keeps_raw_ingredients() {
        let normalized = ResponseNormalizer::default().normalize(StatusCode::OK, "just prose", &request());
        let Normalized::Degraded(recipe) = normalized else {
            panic!("expected degraded result");
        };
        assert_eq!(recipe.title, AI_FALLBACK_TITLE);
        assert_eq!(recipe.ingredients, vec!["egg", " rice "]);
        assert_eq!(recipe.steps, vec!["just prose"]);
        assert_eq!(recipe.servings, 1);
    }

    #[test]
    fn test_repair_fills_gaps_and_clamps_grams() {
        let parsed: RecipeResponse = from_value_case_insensitive(json!({
            "title": "",
            "servings": 0,
            "nutrition": { "calories": -5, "fatGrams": -1.5, "proteinGrams": 2 }
        }))
        .unwrap();
        let repaired = repair(parsed, &request());

        assert_eq!(repaired.title, AI_FALLBACK_TITLE);
        assert_eq!(repaired.ingredients, vec!["egg", " rice "]);
        assert_eq!(repaired.servings, 1);
        let nutrition = repaired.nutrition.unwrap();
        assert_eq!(nutrition.calories, 0);
        assert!(nutrition.fat_grams.abs() < f64::EPSILON);
        assert!((nutrition.protein_grams - 2.0).abs() < f64::EPSILON);
    }
}
