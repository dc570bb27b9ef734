// ABOUTME: Recipe generation pipeline: orchestrator, response normalizer and placeholder fallback
// ABOUTME: Guarantees a well-formed recipe for every request with at least one ingredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

/// Layered extraction of recipes from provider responses
pub mod normalizer;
/// Deterministic network-free fallback
pub mod placeholder;
/// Orchestrator
pub mod service;

pub use normalizer::{
    DirectSchema, EmbeddedJson, ExtractionLayer, LayerOutcome, Normalized, ProviderEnvelope,
    ResponseNormalizer,
};
pub use placeholder::placeholder_recipe;
pub use service::{GenerationFailure, RecipeGenerator};
