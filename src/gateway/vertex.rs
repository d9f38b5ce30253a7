//! Vertex AI adapter for Gemini generation with Google Search grounding.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::VertexConfig;
use crate::prompts::PromptStyle;

use super::error::{ErrorContext, ProviderError};
use super::types::*;
use super::ProviderClient;

// =============================================================================
// ADAPTER
// =============================================================================

/// Maximum allowed response body length (4MB).
const MAX_RESPONSE_LEN: usize = 4 * 1_024 * 1_024;

/// Fixed sampling parameters, identical across benchmark runs.
const TEMPERATURE: f32 = 0.2;
const TOP_P: f32 = 0.8;
const TOP_K: i32 = 40;

/// Vertex AI `generateContent` adapter.
#[derive(Debug, Clone)]
pub struct VertexAdapter {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    location: String,
}

impl VertexAdapter {
    /// Build the HTTP client from an explicit configuration object. No
    /// network activity happens here.
    pub fn new(config: &VertexConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|_| ProviderError::config("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            project_id: config.project_id.clone(),
            location: config.location.clone(),
        })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.base_url, self.project_id, self.location, model
        )
    }

    /// Extract request ID from response headers.
    fn extract_request_id(headers: &reqwest::header::HeaderMap) -> Option<String> {
        headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Issue exactly one generation request and normalize the response.
    pub async fn generate(
        &self,
        model: &str,
        req: &GenerationRequest,
    ) -> Result<GroundedResponse, ProviderError> {
        let start = Instant::now();

        let api_req = GenerateApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: &req.prompt }],
            }],
            system_instruction: ApiSystemInstruction {
                parts: vec![ApiPart {
                    text: &req.system_instruction,
                }],
            },
            tools: vec![ApiTool {
                google_search: GoogleSearchTool {},
            }],
            generation_config: ApiGenerationConfig {
                temperature: req.temperature,
                top_p: req.top_p,
                top_k: req.top_k,
                max_output_tokens: req.max_output_tokens,
            },
        };

        let mut response = self
            .client
            .post(self.generate_url(model))
            .json(&api_req)
            .send()
            .await?;

        let status = response.status();
        let request_id = Self::extract_request_id(response.headers());

        // Stream response to enforce size limit
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let new_len = bytes.len() + chunk.len();
            if new_len > MAX_RESPONSE_LEN {
                return Err(ProviderError::provider(
                    "vertex",
                    format!("Response too large: {new_len} bytes"),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let body = String::from_utf8_lossy(&bytes).to_string();

        let ctx = ErrorContext::new().with_status(status.as_u16());
        let ctx = if let Some(id) = &request_id {
            ctx.with_request_id(id)
        } else {
            ctx
        };

        if !status.is_success() {
            if let Ok(parsed) = serde_json::from_str::<GenerateApiResponse>(&body) {
                if let Some(error) = parsed.error {
                    let message = error.message.unwrap_or_default();
                    let ctx = if let Some(code) = error.status {
                        ctx.with_code(&code)
                    } else {
                        ctx
                    };

                    return Err(if status.as_u16() == 400 {
                        ProviderError::invalid_request(message, ctx)
                    } else {
                        ProviderError::provider_with_context("vertex", message, ctx)
                    });
                }
            }

            return Err(ProviderError::provider_with_context(
                "vertex",
                format!("HTTP {}", status.as_u16()),
                ctx,
            ));
        }

        let parsed: GenerateApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::provider("vertex", format!("Invalid JSON: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::provider(
                "vertex",
                error.message.unwrap_or_default(),
            ));
        }

        // A blocked prompt arrives with feedback and no usable candidates.
        if let Some(feedback) = parsed.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                let message = feedback
                    .block_reason_message
                    .unwrap_or_else(|| format!("prompt blocked: {reason}"));
                return Err(ProviderError::blocked(message));
            }
        }

        let candidate = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| ProviderError::provider("vertex", "No candidates in response"))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::blocked("response blocked: SAFETY"));
        }

        let text = candidate
            .content
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            tracing::warn!(
                finish_reason = candidate.finish_reason.as_deref().unwrap_or("none"),
                "candidate carried no text parts"
            );
        }

        let usage = parsed.usage_metadata.map(|u| TokenUsage {
            prompt: u.prompt_token_count,
            completion: u.candidates_token_count,
            total: u.total_token_count,
        });
        if usage.is_none() {
            tracing::warn!("response carried no usage metadata");
        }

        let grounding = candidate.grounding_metadata.map(|g| GroundingMetadata {
            web_search_queries: g.web_search_queries.unwrap_or_default(),
            grounding_chunks: g
                .grounding_chunks
                .unwrap_or_default()
                .into_iter()
                .map(|chunk| {
                    let web = chunk.web.unwrap_or_default();
                    GroundingChunk {
                        uri: web.uri,
                        title: web.title,
                    }
                })
                .collect(),
            search_entry_point: g.search_entry_point.and_then(|e| e.rendered_content),
        });

        Ok(GroundedResponse {
            text,
            usage,
            grounding,
            latency: start.elapsed(),
            finish_reason: candidate.finish_reason,
        })
    }
}

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    system_instruction: ApiSystemInstruction<'a>,
    tools: Vec<ApiTool>,
    generation_config: ApiGenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ApiSystemInstruction<'a> {
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiTool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearchTool,
}

#[derive(Serialize)]
struct GoogleSearchTool {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateApiResponse {
    candidates: Option<Vec<ApiCandidate>>,
    usage_metadata: Option<ApiUsageMetadata>,
    prompt_feedback: Option<ApiPromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    content: Option<ApiContentOut>,
    finish_reason: Option<String>,
    grounding_metadata: Option<ApiGroundingMetadata>,
}

#[derive(Deserialize)]
struct ApiContentOut {
    parts: Option<Vec<ApiPartOut>>,
}

#[derive(Deserialize)]
struct ApiPartOut {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGroundingMetadata {
    web_search_queries: Option<Vec<String>>,
    grounding_chunks: Option<Vec<ApiGroundingChunk>>,
    search_entry_point: Option<ApiSearchEntryPoint>,
}

#[derive(Deserialize)]
struct ApiGroundingChunk {
    web: Option<ApiWebSource>,
}

#[derive(Deserialize, Default)]
struct ApiWebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSearchEntryPoint {
    rendered_content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    status: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Gemini on Vertex AI with Google Search grounding.
///
/// Owns the prompt style, so `query` goes from raw contract + question to a
/// recordable [`QueryResult`] in one call.
pub struct GeminiVertexClient {
    adapter: VertexAdapter,
    model: String,
    style: PromptStyle,
}

impl GeminiVertexClient {
    pub fn new(
        config: &VertexConfig,
        model: impl Into<String>,
        style: PromptStyle,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            adapter: VertexAdapter::new(config)?,
            model: model.into(),
            style,
        })
    }
}

#[async_trait]
impl ProviderClient for GeminiVertexClient {
    async fn query(&self, contract_text: &str, question_text: &str) -> QueryResult {
        let prompt = self.style.template().render(contract_text, question_text);

        let req = GenerationRequest {
            system_instruction: prompt.system,
            prompt: prompt.user,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: self.style.max_output_tokens(),
        };

        match self.adapter.generate(&self.model, &req).await {
            Ok(resp) => QueryResult::success(
                self.model.clone(),
                resp.text,
                resp.latency,
                resp.usage,
                resp.grounding,
            ),
            Err(err) => QueryResult::failure(self.model.clone(), &err),
        }
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
