//! Run report schema and persistence.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gateway::QueryResult;

/// One question's full outcome: the catalog metadata plus the provider response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    pub qa_id: String,
    pub question_type: String,
    pub regulation_focus: String,
    pub contract_file: String,
    pub contract_size_chars: usize,
    pub question: String,
    pub expected_answer: String,
    pub expected_citation: String,
    pub response: QueryResult,
}

/// The single persisted artifact of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub test_date: String,
    pub test_type: String,
    pub model: String,
    pub platform: String,
    pub project_id: String,
    pub location: String,
    pub description: String,
    pub total_questions: usize,
    pub results: Vec<TestRecord>,
}

/// Write the report as a single pretty-printed UTF-8 JSON document,
/// overwriting any existing file.
///
/// Non-ASCII characters are preserved as-is. The write goes through a
/// sibling temp file and a rename, so readers never observe a half-written
/// report.
pub fn write_report(report: &RunReport, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("not a file path: {}", path.display())))?;
    let tmp = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)
}
