//! Sequential benchmark execution.

use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::contracts::{ContractError, ContractStore};
use crate::gateway::ProviderClient;
use crate::questions::{QuestionFilter, QuestionSpec};
use crate::report::TestRecord;

#[derive(Debug, Error)]
pub enum RunError {
    /// The requested id set matched nothing. Raised before any contract read
    /// or network call.
    #[error("no questions found matching: {filter}")]
    NoQuestionsMatched { filter: String },

    /// A contract could not be resolved. Fatal: no question can run without
    /// its contract, and nothing partial is persisted.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Runs questions strictly in sequence: one question is fully processed
/// (read, build, query, record) before the next begins, with a deliberate
/// pause between questions to stay under the provider's request quota.
pub struct TestRunner<P: ProviderClient> {
    contracts: ContractStore,
    provider: P,
}

impl<P: ProviderClient> TestRunner<P> {
    pub fn new(contracts: ContractStore, provider: P) -> Self {
        Self {
            contracts,
            provider,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute the filtered question set in catalog order.
    ///
    /// Provider failures are recorded per question and never abort the run;
    /// contract-lookup failures do.
    pub async fn run(
        &self,
        specs: &[QuestionSpec],
        filter: &QuestionFilter,
        delay_seconds: f64,
    ) -> Result<Vec<TestRecord>, RunError> {
        let selected = filter.apply(specs);
        if selected.is_empty() {
            return Err(RunError::NoQuestionsMatched {
                filter: filter.to_string(),
            });
        }

        let ids: Vec<&str> = selected.iter().map(|s| s.qa_id.as_str()).collect();
        eprintln!(
            "[run] testing {} question(s): {}",
            selected.len(),
            ids.join(", ")
        );

        let mut records = Vec::with_capacity(selected.len());
        for (i, spec) in selected.iter().enumerate() {
            eprintln!("\n[run] [{}/{}] starting test...", i + 1, selected.len());
            let record = self.run_question(spec).await?;
            records.push(record);

            if i + 1 < selected.len() && delay_seconds > 0.0 {
                eprintln!("[run] waiting {delay_seconds}s before next question...");
                sleep(Duration::from_secs_f64(delay_seconds)).await;
            }
        }

        Ok(records)
    }

    async fn run_question(&self, spec: &QuestionSpec) -> Result<TestRecord, RunError> {
        eprintln!(
            "[run] {} - {} ({})",
            spec.qa_id, spec.question_type, spec.contract_file
        );

        let contract = self.contracts.read(&spec.contract_file)?;
        let contract_size_chars = contract.chars().count();
        eprintln!("[run] using full contract: {contract_size_chars} chars");

        let response = self.provider.query(&contract, &spec.question_text).await;

        if let Some(error) = &response.error {
            eprintln!("[run] {} failed: {error}", spec.qa_id);
            if let Some(trace) = &response.error_trace {
                eprintln!("[run] trace: {trace}");
            }
        } else {
            let elapsed = response.elapsed_seconds.unwrap_or(0.0);
            eprintln!("[run] {} ok ({elapsed:.1}s)", spec.qa_id);
            if let Some(total) = response.tokens_used.as_ref().and_then(|t| t.total) {
                eprintln!("[run]   tokens: {total}");
            }
            if let Some(grounding) = &response.grounding_metadata {
                eprintln!(
                    "[run]   search queries: {}, grounding chunks: {}",
                    grounding.web_search_queries.len(),
                    grounding.grounding_chunks.len()
                );
            }
        }

        Ok(TestRecord {
            qa_id: spec.qa_id.clone(),
            question_type: spec.question_type.clone(),
            regulation_focus: spec.regulation_focus.clone(),
            contract_file: spec.contract_file.clone(),
            contract_size_chars,
            question: spec.question_text.clone(),
            expected_answer: spec.expected_answer.clone(),
            expected_citation: spec.expected_citation.clone(),
            response,
        })
    }
}
