//! Core types for the provider gateway.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// Token-usage breakdown as reported by the provider. Every field is
/// optional: some providers omit parts of the accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: Option<u32>,
    pub completion: Option<u32>,
    pub total: Option<u32>,
}

/// A web source the provider consulted while grounding its answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Search activity the provider reported alongside the generated text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingMetadata {
    /// Search queries the provider issued.
    #[serde(default)]
    pub web_search_queries: Vec<String>,
    /// Sources consulted.
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Rendered search-entry-point snippet, when exposed.
    pub search_entry_point: Option<String>,
}

/// Outcome of one provider query, success or failure. Never mutated after
/// creation; embedded verbatim into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: Option<String>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,
}

impl QueryResult {
    pub fn success(
        model: impl Into<String>,
        answer: String,
        latency: Duration,
        tokens_used: Option<TokenUsage>,
        grounding_metadata: Option<GroundingMetadata>,
    ) -> Self {
        Self {
            answer: Some(answer),
            model: model.into(),
            elapsed_seconds: Some(latency.as_secs_f64()),
            tokens_used,
            grounding_metadata,
            error: None,
            error_trace: None,
        }
    }

    /// Convert a provider failure into a recordable result: null answer,
    /// human-readable message, full diagnostic trace.
    pub fn failure(model: impl Into<String>, err: &ProviderError) -> Self {
        Self {
            answer: None,
            model: model.into(),
            elapsed_seconds: None,
            tokens_used: None,
            grounding_metadata: None,
            error: Some(err.to_string()),
            error_trace: Some(err.trace()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One generation request: prompt halves plus the fixed sampling parameters.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: u32,
}

/// Normalized provider response before conversion into a [`QueryResult`].
#[derive(Debug, Clone)]
pub struct GroundedResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
    pub grounding: Option<GroundingMetadata>,
    pub latency: Duration,
    pub finish_reason: Option<String>,
}
