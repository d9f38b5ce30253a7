//! Provider gateway for grounded generation.
//!
//! One implementation per hosted API behind the [`ProviderClient`] trait.
//! Every failure along the request path converts into a [`QueryResult`]
//! carrying the error, so a single provider failure never aborts a run.

pub mod error;
pub mod types;
pub mod vertex;

use async_trait::async_trait;

pub use error::{ErrorContext, ProviderError};
pub use types::{
    GenerationRequest, GroundedResponse, GroundingChunk, GroundingMetadata, QueryResult,
    TokenUsage,
};
pub use vertex::{GeminiVertexClient, VertexAdapter};

/// A search-grounded provider under benchmark.
///
/// `query` issues at most one outbound request and always returns a result:
/// provider failures are captured in the result's error fields rather than
/// propagated.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn query(&self, contract_text: &str, question_text: &str) -> QueryResult;

    /// Model identifier recorded in results.
    fn model_id(&self) -> &str;
}
