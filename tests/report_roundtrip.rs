use std::time::Duration;

use async_trait::async_trait;
use lexbench::contracts::ContractStore;
use lexbench::gateway::{ProviderClient, QueryResult, TokenUsage};
use lexbench::prompts::PromptStyle;
use lexbench::questions::{default_questions, QuestionFilter};
use lexbench::report::{write_report, RunReport};
use lexbench::runner::TestRunner;

struct FixedProvider;

#[async_trait]
impl ProviderClient for FixedProvider {
    async fn query(&self, _contract_text: &str, _question_text: &str) -> QueryResult {
        QueryResult::success(
            "stub-model",
            "X".to_string(),
            Duration::from_millis(1),
            Some(TokenUsage {
                prompt: Some(10),
                completion: Some(20),
                total: Some(30),
            }),
            None,
        )
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

#[tokio::test]
async fn single_question_run_roundtrips_through_json() {
    let specs = default_questions();

    // Corpus containing only the contract question 1A needs.
    let data_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        data_dir.path().join(&specs[0].contract_file),
        "COLLABORATION AGREEMENT. Section 1.1: genomic data.",
    )
    .unwrap();

    let runner = TestRunner::new(ContractStore::at(data_dir.path()), FixedProvider);
    let records = runner
        .run(&specs, &QuestionFilter::parse("1A"), 0.0)
        .await
        .unwrap();

    let style = PromptStyle::Focused;
    let report = RunReport {
        test_date: "2025-11-05T12:00:00-05:00".to_string(),
        test_type: style.test_type().to_string(),
        model: "stub-model".to_string(),
        platform: "vertex_ai".to_string(),
        project_id: "test-project".to_string(),
        location: "us-central1".to_string(),
        description: style.description().to_string(),
        total_questions: records.len(),
        results: records,
    };

    let out_dir = tempfile::tempdir().unwrap();
    let path = out_dir.path().join("results.json");
    write_report(&report, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed["total_questions"], 1);
    assert_eq!(parsed["results"][0]["qa_id"], "1A");
    assert_eq!(parsed["results"][0]["response"]["answer"], "X");
    assert_eq!(parsed["results"][0]["response"]["tokens_used"]["total"], 30);
    assert_eq!(parsed["test_type"], "gemini_vertex_search_grounding");
    assert_eq!(parsed["platform"], "vertex_ai");

    // The typed schema parses back with the same ordered ids.
    let reparsed: RunReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(reparsed.results.len(), reparsed.total_questions);
    assert_eq!(reparsed.results[0].qa_id, "1A");
}

#[tokio::test]
async fn full_default_run_keeps_catalog_order() {
    let specs = default_questions();

    let data_dir = tempfile::tempdir().unwrap();
    for spec in &specs {
        std::fs::write(data_dir.path().join(&spec.contract_file), "AGREEMENT").unwrap();
    }

    let runner = TestRunner::new(ContractStore::at(data_dir.path()), FixedProvider);
    let records = runner
        .run(&specs, &QuestionFilter::parse("all"), 0.0)
        .await
        .unwrap();

    let report = RunReport {
        test_date: "2025-11-05T12:00:00-05:00".to_string(),
        test_type: "gemini_vertex_search_grounding".to_string(),
        model: "stub-model".to_string(),
        platform: "vertex_ai".to_string(),
        project_id: "test-project".to_string(),
        location: "us-central1".to_string(),
        description: "ordering check".to_string(),
        total_questions: records.len(),
        results: records,
    };

    let out_dir = tempfile::tempdir().unwrap();
    let path = out_dir.path().join("results.json");
    write_report(&report, &path).unwrap();

    let parsed: RunReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let ids: Vec<_> = parsed.results.iter().map(|r| r.qa_id.as_str()).collect();
    assert_eq!(ids, vec!["1A", "1B", "2A", "3A", "4A", "5A"]);
    assert_eq!(parsed.total_questions, 6);
}
