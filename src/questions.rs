//! Benchmark question catalog.
//!
//! Question specs are plain configuration data: the built-in set below is the
//! canonical six-question benchmark, and `load_questions` reads an alternate
//! set from a JSON array so the catalog can evolve without touching the
//! orchestration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One benchmark question with its contract and expected-answer metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub qa_id: String,
    pub question_type: String,
    pub regulation_focus: String,
    pub contract_file: String,
    pub question_text: String,
    pub expected_answer: String,
    pub expected_citation: String,
}

#[derive(Debug, Error)]
pub enum QuestionLoadError {
    #[error("failed to read questions file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse questions file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a question set from a JSON array of specs.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<QuestionSpec>, QuestionLoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| QuestionLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| QuestionLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Restriction on which question ids to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    Ids(Vec<String>),
}

impl QuestionFilter {
    /// Parse the CLI form: the literal `all`, or comma-separated ids like
    /// `1A,5A`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("all") {
            return QuestionFilter::All;
        }
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        QuestionFilter::Ids(ids)
    }

    pub fn matches(&self, qa_id: &str) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Ids(ids) => ids.iter().any(|id| id == qa_id),
        }
    }

    /// Select matching specs, preserving their original relative order.
    pub fn apply(&self, specs: &[QuestionSpec]) -> Vec<QuestionSpec> {
        specs
            .iter()
            .filter(|spec| self.matches(&spec.qa_id))
            .cloned()
            .collect()
    }
}

impl fmt::Display for QuestionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionFilter::All => f.write_str("all"),
            QuestionFilter::Ids(ids) => f.write_str(&ids.join(",")),
        }
    }
}

/// The built-in six-question benchmark set.
pub fn default_questions() -> Vec<QuestionSpec> {
    fn spec(
        qa_id: &str,
        question_type: &str,
        regulation_focus: &str,
        contract_file: &str,
        question_text: &str,
        expected_answer: &str,
        expected_citation: &str,
    ) -> QuestionSpec {
        QuestionSpec {
            qa_id: qa_id.to_string(),
            question_type: question_type.to_string(),
            regulation_focus: regulation_focus.to_string(),
            contract_file: contract_file.to_string(),
            question_text: question_text.to_string(),
            expected_answer: expected_answer.to_string(),
            expected_citation: expected_citation.to_string(),
        }
    }

    vec![
        spec(
            "1A",
            "Data Processing Permissions",
            "GDPR, EU AI Act, Data Protection",
            "FOUNDATIONMEDICINE,INC_02_02_2015-EX-10.2-Collaboration Agreement.txt",
            "Are we permitted to process the genomic data of our customers?",
            "Analysis should cover GDPR Article 6 and Article 9 (special category data), consent requirements, data processing agreements, cross-border transfer mechanisms",
            "GDPR Articles 6, 9; Contract data processing clauses",
        ),
        spec(
            "1B",
            "Data Governance Compliance",
            "GDPR, EU AI Act Article 10",
            "FOUNDATIONMEDICINE,INC_02_02_2015-EX-10.2-Collaboration Agreement.txt",
            "Is this contract compliant with current data governance rules? If not, what is missing?",
            "Should assess GDPR data governance requirements, EU AI Act Article 10, data quality standards, bias detection/mitigation, record-keeping obligations",
            "GDPR; Regulation (EU) 2024/1689, Article 10",
        ),
        spec(
            "2A",
            "Brexit Amendments",
            "UK REUL Act 2023, Post-Brexit Regulatory Divergence",
            "WPPPLC_04_30_2020-EX-4.28-SERVICE AGREEMENT.txt",
            "Do any amendments need to be made on account of Brexit?",
            "Should identify references to EU regulations that are now UK-retained law, GDPR vs UK GDPR differences, data transfer mechanisms between UK and EU",
            "UK REUL Act 2023; UK GDPR; FCA guidance on retained EU law",
        ),
        spec(
            "3A",
            "California Data Protection Compliance",
            "California CPRA, CPPA ADMT Regulations",
            "CardlyticsInc_20180112_S-1_EX-10.16_11002987_EX-10.16_Maintenance Agreement1.txt",
            "Is this contract compliant with data protection laws in California?",
            "Should assess CPRA compliance, ADMT regulations (Nov 2024), risk assessment obligations, consumer opt-out rights, service provider requirements",
            "California CPRA (Civil Code § 1798.100 et seq.); CPPA ADMT regulations (Nov 2024)",
        ),
        spec(
            "4A",
            "ESG Compliance Assessment",
            "EU CSDDD, ESG Standards",
            "UpjohnInc_20200121_10-12G_EX-2.6_11948692_EX-2.6_Manufacturing Agreement_ Supply Agreement.txt",
            "Assess this agreement for ESG compliance.",
            "Should evaluate EU CSDDD compliance (Directive 2024/1760), supply chain monitoring, labor standards enforcement, environmental impact, grievance mechanisms, Scope 3 emissions tracking",
            "Directive (EU) 2024/1760 (CSDDD), Articles 7-8, 15; ISO ESG standards",
        ),
        spec(
            "5A",
            "Non-Compete Validity",
            "FTC Non-Compete Ban, State Law",
            "MEDALISTDIVERSIFIEDREIT,INC_05_18_2020-EX-10.1-CONSULTING AGREEMENT.txt",
            "Is the non-compete clause valid?",
            "Should analyze FTC non-compete ban status (finalized August 2024, currently enjoined), senior executive exception, contractor vs employee status, applicable state law, reasonableness of scope/duration/geography",
            "FTC Rule 16 CFR § 910; Ryan LLC v. FTC (August 2024 injunction); Virginia state law on non-competes",
        ),
    ]
}
