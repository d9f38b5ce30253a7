#![forbid(unsafe_code)]

//! # lexbench
//!
//! Benchmark harness for search-grounded LLM legal contract analysis.
//!
//! Sends full contract texts plus a fixed catalog of regulatory questions to a
//! hosted model with real-time search grounding enabled, and records every
//! answer — along with token usage and the search queries the provider issued —
//! as a JSON report for cross-provider comparison.
//!
//! The provider seam is the [`ProviderClient`] trait: one implementation per
//! hosted API, selected by the caller. [`GeminiVertexClient`] targets Gemini on
//! Vertex AI with Google Search grounding.

pub mod config;
pub mod contracts;
pub mod gateway;
pub mod prompts;
pub mod questions;
pub mod report;
pub mod runner;

pub use config::{Env, EnvFile, VertexConfig};
pub use contracts::ContractStore;
pub use gateway::{
    GeminiVertexClient, GroundingMetadata, ProviderClient, ProviderError, QueryResult, TokenUsage,
    VertexAdapter,
};
pub use prompts::PromptStyle;
pub use questions::{default_questions, QuestionFilter, QuestionSpec};
pub use report::{write_report, RunReport, TestRecord};
pub use runner::{RunError, TestRunner};
