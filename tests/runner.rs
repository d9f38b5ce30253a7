use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lexbench::contracts::ContractStore;
use lexbench::gateway::{ProviderClient, ProviderError, QueryResult, TokenUsage};
use lexbench::questions::{QuestionFilter, QuestionSpec};
use lexbench::runner::{RunError, TestRunner};
use tempfile::TempDir;

struct StubProvider {
    answer: String,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    fn answering(answer: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                answer: answer.to_string(),
                fail: false,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn failing() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                answer: String::new(),
                fail: true,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl ProviderClient for StubProvider {
    async fn query(&self, _contract_text: &str, _question_text: &str) -> QueryResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            QueryResult::failure(
                "stub-model",
                &ProviderError::provider("stub", "simulated outage"),
            )
        } else {
            QueryResult::success(
                "stub-model",
                self.answer.clone(),
                Duration::from_millis(5),
                Some(TokenUsage {
                    prompt: Some(10),
                    completion: Some(20),
                    total: Some(30),
                }),
                None,
            )
        }
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

fn spec(qa_id: &str, contract_file: &str) -> QuestionSpec {
    QuestionSpec {
        qa_id: qa_id.to_string(),
        question_type: "Non-Compete Validity".to_string(),
        regulation_focus: "FTC Rule 16 CFR § 910".to_string(),
        contract_file: contract_file.to_string(),
        question_text: "Is the non-compete clause valid?".to_string(),
        expected_answer: "FTC ban status".to_string(),
        expected_citation: "16 CFR § 910".to_string(),
    }
}

fn corpus(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        std::fs::write(
            dir.path().join(name),
            format!("CONSULTING AGREEMENT ({name})"),
        )
        .unwrap();
    }
    dir
}

#[tokio::test]
async fn all_filter_produces_one_record_per_spec_in_order() {
    let dir = corpus(&["a.txt", "b.txt", "c.txt"]);
    let specs = vec![spec("1A", "a.txt"), spec("2A", "b.txt"), spec("5A", "c.txt")];
    let (provider, calls) = StubProvider::answering("analysis");
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    let records = runner
        .run(&specs, &QuestionFilter::parse("all"), 0.0)
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.qa_id.as_str()).collect();
    assert_eq!(ids, vec!["1A", "2A", "5A"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn subset_filter_preserves_catalog_order_and_skips_queries() {
    let dir = corpus(&["a.txt", "b.txt", "c.txt"]);
    let specs = vec![spec("1A", "a.txt"), spec("2A", "b.txt"), spec("5A", "c.txt")];
    let (provider, calls) = StubProvider::answering("analysis");
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    // Ids listed out of order still come back in catalog order.
    let records = runner
        .run(&specs, &QuestionFilter::parse("5A,1A"), 0.0)
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.qa_id.as_str()).collect();
    assert_eq!(ids, vec!["1A", "5A"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_filter_aborts_before_any_query() {
    let dir = corpus(&["a.txt"]);
    let specs = vec![spec("1A", "a.txt")];
    let (provider, calls) = StubProvider::answering("analysis");
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    let err = runner
        .run(&specs, &QuestionFilter::parse("9Z"), 0.0)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::NoQuestionsMatched { .. }));
    assert!(err.to_string().contains("9Z"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_error_still_populates_record() {
    let dir = corpus(&["a.txt"]);
    let specs = vec![spec("1A", "a.txt")];
    let (provider, _calls) = StubProvider::failing();
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    let records = runner
        .run(&specs, &QuestionFilter::parse("all"), 0.0)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.qa_id, "1A");
    assert_eq!(record.question_type, "Non-Compete Validity");
    assert_eq!(record.contract_file, "a.txt");
    assert!(record.contract_size_chars > 0);
    assert!(record.response.answer.is_none());
    assert!(record
        .response
        .error
        .as_deref()
        .unwrap()
        .contains("simulated outage"));
}

#[tokio::test]
async fn missing_contract_aborts_run() {
    let dir = corpus(&[]);
    let specs = vec![spec("1A", "absent.txt")];
    let (provider, calls) = StubProvider::answering("analysis");
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    let err = runner
        .run(&specs, &QuestionFilter::parse("all"), 0.0)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Contract(_)));
    assert!(err.to_string().contains("absent.txt"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contract_size_counts_characters() {
    let dir = tempfile::tempdir().unwrap();
    // 3 characters, 6 bytes.
    std::fs::write(dir.path().join("a.txt"), "§§§").unwrap();
    let specs = vec![spec("1A", "a.txt")];
    let (provider, _calls) = StubProvider::answering("analysis");
    let runner = TestRunner::new(ContractStore::at(dir.path()), provider);

    let records = runner
        .run(&specs, &QuestionFilter::parse("all"), 0.0)
        .await
        .unwrap();
    assert_eq!(records[0].contract_size_chars, 3);
}
