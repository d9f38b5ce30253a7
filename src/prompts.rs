//! Prompt templates for grounded legal analysis.
//!
//! Domain logic for rendering the benchmark prompt. Provider-agnostic: the
//! rendered instance is a system instruction plus a user prompt, and the
//! full contract text is always embedded as-is. Callers are responsible for
//! staying under whatever input limit the provider imposes.

/// Rendered prompt ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInstance {
    pub system: String,
    pub user: String,
}

/// A prompt template with `{contract_text}` / `{question_text}` placeholders
/// in the user half.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub slug: &'static str,
    pub system: &'static str,
    pub user: &'static str,
}

impl PromptTemplate {
    /// Pure function of its inputs: identical inputs render byte-identical
    /// output. The contract is substituted last so its content is never
    /// re-scanned for placeholders.
    pub fn render(&self, contract_text: &str, question_text: &str) -> PromptInstance {
        let user = self
            .user
            .replace("{question_text}", question_text)
            .replace("{contract_text}", contract_text);
        PromptInstance {
            system: self.system.to_string(),
            user,
        }
    }
}

/// Which benchmark variant to run.
///
/// The two variants differ only in prompt verbosity and output budget; one
/// runner handles both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Pinpoint-citation prompt with an 8000-token output budget.
    Focused,
    /// Long-form prompt with a 6000-token output budget, sized to match the
    /// Perplexity harness for fair comparison.
    Comprehensive,
}

impl PromptStyle {
    pub fn template(&self) -> PromptTemplate {
        match self {
            PromptStyle::Focused => FOCUSED_PROMPT,
            PromptStyle::Comprehensive => COMPREHENSIVE_PROMPT,
        }
    }

    pub fn max_output_tokens(&self) -> u32 {
        match self {
            PromptStyle::Focused => 8000,
            PromptStyle::Comprehensive => 6000,
        }
    }

    /// `test_type` label recorded in the report.
    pub fn test_type(&self) -> &'static str {
        match self {
            PromptStyle::Focused => "gemini_vertex_search_grounding",
            PromptStyle::Comprehensive => "gemini_simple_search_grounding",
        }
    }

    /// Free-text configuration description recorded in the report.
    pub fn description(&self) -> &'static str {
        match self {
            PromptStyle::Focused => {
                "Gemini with Vertex AI Google Search grounding for legal research"
            }
            PromptStyle::Comprehensive => {
                "Gemini with Vertex AI Google Search grounding - same prompt and 6000 token limit as Perplexity for fair comparison"
            }
        }
    }

    pub fn default_report_path(&self) -> &'static str {
        match self {
            PromptStyle::Focused => "gemini_vertex_results.json",
            PromptStyle::Comprehensive => "gemini_simple_results.json",
        }
    }
}

pub const FOCUSED_PROMPT: PromptTemplate = PromptTemplate {
    slug: "focused_v1",
    system: r#"You are a legal research AI assistant with real-time Google Search capabilities.

Your task is to provide precise, well-cited legal analysis. You MUST:

1. **Find the current, applicable law** - Use Google Search to locate the exact regulations, statutes, and case law that apply as of November 5, 2025

2. **Provide pinpoint citations** - Cite specific provisions with precise article/section/paragraph numbers (e.g., "GDPR Article 9(2)(a)", "16 CFR § 910.2(a)(1)", "Cal. Civ. Code § 1798.140(ag)(1)")

3. **Include direct quotes** - For EACH key legal requirement, provide a direct quote from the actual legal text (not summaries or paraphrases)

4. **Link to primary sources** - Provide URLs to official government sites, legislation databases, or authoritative regulatory sources

5. **Apply law to contract** - Analyze specific contract provisions against the legal requirements, citing exact contract section numbers

Your answers should demonstrate:
- Precision in legal citations
- Direct quotes from legislation/regulations
- Correct identification of applicable law
- Clear application to the contract provisions"#,
    user: r#"FULL CONTRACT TEXT:
{contract_text}

QUESTION:
{question_text}

CRITICAL REQUIREMENTS:

1. **CURRENT LAW (as of November 5, 2025):**
   - Use Google Search to find the most current version of applicable regulations
   - Verify effective dates and recent amendments
   - If regulations changed in 2024 or 2025, note this explicitly

2. **PINPOINT CITATIONS:**
   - Every legal requirement must have a precise citation
   - Format: Regulation name + Article/Section + Subsection
   - Example: "Regulation (EU) 2024/1689, Article 10(2)(b)"

3. **DIRECT QUOTES:**
   - For EACH key regulation cited, include the actual text in quotation marks
   - Quote the specific provision that establishes the requirement
   - Do not paraphrase - use the exact legal language

4. **PRIMARY SOURCE URLS:**
   - Link to official sources: eur-lex.europa.eu, ecfr.gov, leginfo.legislature.ca.gov, legislation.gov.uk
   - Each major regulation should have at least one primary source URL

5. **CONTRACT APPLICATION:**
   - Reference specific contract sections by number
   - Explain whether each provision complies, partially complies, or fails to comply
   - Identify specific gaps or missing provisions

6. **STRUCTURE YOUR ANSWER:**
   a) Identify applicable regulations (with citations and URLs)
   b) Quote key legal requirements (direct text from regulations)
   c) Analyze contract provisions (cite specific sections)
   d) Assess compliance (with reasoning)
   e) Identify gaps or issues

Focus on precision, not length. Every claim about the law must be cited and quoted."#,
};

pub const COMPREHENSIVE_PROMPT: PromptTemplate = PromptTemplate {
    slug: "comprehensive_v1",
    system: r#"You are a senior legal research AI assistant with real-time Google Search capabilities, specializing in contract analysis and regulatory compliance.

Your task is to provide COMPREHENSIVE, well-cited legal analysis. You MUST:

1. **Find ALL current, applicable law** - Use Google Search extensively to locate:
   - Federal regulations, statutes, and recent rules (as of November 5, 2025)
   - State-specific laws and recent amendments
   - Recent court decisions and injunctions
   - Agency guidance and interpretations
   - International regulations if applicable (EU, UK, etc.)

2. **Provide COMPLETE analysis with pinpoint citations** - For every legal requirement:
   - Exact citation: "GDPR Article 9(2)(a)", "16 CFR § 910.2(a)(1)", "Cal. Civ. Code § 1798.140(ag)(1)"
   - Effective date and status (active, enjoined, amended)
   - Direct quote from the legal text (not summaries)
   - Official source URL

3. **Include ALL relevant context** - Your analysis should cover:
   - Historical context (previous versions of law, amendments)
   - Current legal status (in effect, enjoined, challenged)
   - Exceptions and exemptions
   - Industry-specific applications
   - Conflicting regulations and how to resolve them
   - Pending legislation that may affect compliance

4. **Thorough contract analysis** - For each provision:
   - Quote the exact contract language (with section numbers)
   - Compare against legal requirements point-by-point
   - Identify compliance status: compliant, partially compliant, non-compliant, unclear
   - List ALL missing provisions or gaps
   - Note ambiguous language that could create risk

5. **Structure your answer comprehensively**:
   a) Executive Summary (2-3 sentences)
   b) Applicable Regulations (with full citations, dates, URLs)
   c) Key Legal Requirements (direct quotes from each regulation)
   d) Detailed Contract Analysis (quote and analyze each relevant section)
   e) Compliance Assessment (comprehensive evaluation)
   f) Identified Gaps and Missing Provisions
   g) Recommendations (what needs to be added/changed)
   h) Risk Assessment (potential consequences of non-compliance)

6. **Use Google Search extensively** - Search multiple times for:
   - Primary sources of law
   - Recent amendments and updates
   - Court cases and injunctions
   - Regulatory guidance
   - Cross-references and related regulations

Your answers should be THOROUGH, not brief. Legal analysis requires comprehensive coverage. Include ALL relevant information, not just highlights."#,
    user: r#"You are analyzing a legal contract for regulatory compliance. Provide a COMPREHENSIVE legal analysis.

═══════════════════════════════════════════════════════════════════════════════
FULL CONTRACT TEXT (READ CAREFULLY):
═══════════════════════════════════════════════════════════════════════════════

{contract_text}

═══════════════════════════════════════════════════════════════════════════════
LEGAL QUESTION TO ANALYZE:
═══════════════════════════════════════════════════════════════════════════════

{question_text}

═══════════════════════════════════════════════════════════════════════════════
MANDATORY REQUIREMENTS FOR YOUR ANALYSIS:
═══════════════════════════════════════════════════════════════════════════════

1. **COMPREHENSIVE LEGAL RESEARCH (as of November 5, 2025):**

   Use Google Search EXTENSIVELY to find:

   a) ALL applicable federal regulations
      - Search: "[topic] federal regulations 2025"
      - Search: "FTC [topic] rule 2024 2025"
      - Search: "[agency] final rule [topic]"

   b) ALL applicable state laws
      - Search: "[state] [topic] law 2025"
      - Search: "[state] code section [topic]"

   c) Recent amendments and changes
      - Search: "[regulation name] amended 2024 2025"
      - Search: "[regulation] effective date"

   d) Court challenges and injunctions
      - Search: "[regulation name] court injunction 2024"
      - Search: "[regulation name] enjoined stayed"

   e) International regulations (if applicable)
      - Search: "EU [topic] regulation 2024"
      - Search: "GDPR AI Act 2024"

2. **DETAILED CITATIONS WITH COMPLETE CONTEXT:**

   For EVERY regulation mentioned, provide:
   - Full citation: "Title, CFR Part, Section, Subsection"
   - Effective date: "Effective [date]" or "Finalized [date], currently enjoined"
   - Current status: "In force", "Enjoined", "Under review"
   - Direct quote: The actual text from the regulation (3-5 sentences minimum)
   - Official URL: Link to ecfr.gov, eur-lex.europa.eu, state .gov sites

3. **THOROUGH CONTRACT ANALYSIS:**

   For EACH relevant contract provision:

   a) Quote the exact contract language:
      "Section [X.X] states: '[exact text from contract]'"

   b) Identify which legal requirement it addresses:
      "This provision relates to [specific regulation, citation]"

   c) Analyze compliance in detail:
      - Does it fully comply? Why or why not?
      - What specific elements are present/missing?
      - How does the language compare to the legal requirement?

   d) Assess gaps:
      - What additional provisions are required by law but missing?
      - What provisions are present but inadequate?
      - What provisions conflict with legal requirements?

4. **STRUCTURE YOUR COMPLETE ANSWER:**

   **A. EXECUTIVE SUMMARY** (3-5 sentences)
   Brief overview of findings and overall compliance status.

   **B. APPLICABLE REGULATIONS** (Comprehensive list with full details)
   List ALL relevant regulations with:
   - Full citation
   - Effective date and current status
   - Primary source URL
   - Brief description of what it covers

   **C. KEY LEGAL REQUIREMENTS** (Quote extensively from each regulation)
   For each major regulation:
   - Quote the key provisions (full text, not summaries)
   - Explain what compliance requires
   - Note any exceptions or safe harbors

   **D. DETAILED CONTRACT ANALYSIS** (Section by section)
   For each relevant contract section:
   - Quote the contract provision
   - Identify which legal requirement it addresses
   - Analyze compliance status
   - Note strengths and weaknesses

   **E. COMPLIANCE ASSESSMENT** (Overall evaluation)
   - What is compliant?
   - What is partially compliant? (explain the gap)
   - What is non-compliant? (explain the violation)
   - What is unclear or ambiguous?

   **F. IDENTIFIED GAPS AND MISSING PROVISIONS** (Complete list)
   List ALL missing requirements:
   - What provisions are required by law but absent?
   - What disclosures are required but missing?
   - What procedures are required but not documented?

   **G. RECOMMENDATIONS** (Specific, actionable)
   - What specific language should be added?
   - What provisions should be modified?
   - What additional agreements or notices are needed?

   **H. RISK ASSESSMENT** (Consequences of non-compliance)
   - Legal risks
   - Regulatory enforcement risks
   - Financial penalties
   - Business impact

5. **QUALITY REQUIREMENTS:**

   - Minimum 2,000 words for comprehensive analysis
   - Use Google Search at least 5-10 times
   - Cite at least 5-10 specific legal sources
   - Quote actual legal text (not summaries) for each key requirement
   - Provide official URLs for ALL major regulations cited
   - Reference specific contract sections by number
   - Be thorough, not brief - legal analysis requires detail

6. **VERIFICATION:**

   Before submitting your answer, verify:
   - [ ] Have I searched for ALL applicable laws and regulations?
   - [ ] Have I included the current status (effective, enjoined, etc.)?
   - [ ] Have I quoted the actual legal text (not paraphrased)?
   - [ ] Have I provided official URLs for sources?
   - [ ] Have I analyzed EACH relevant contract provision?
   - [ ] Have I identified ALL gaps and missing provisions?
   - [ ] Is my analysis comprehensive (2,000+ words)?

═══════════════════════════════════════════════════════════════════════════════
BEGIN YOUR COMPREHENSIVE ANALYSIS:
═══════════════════════════════════════════════════════════════════════════════"#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_deterministic() {
        let contract = "Section 1.1: the parties agree.";
        let question = "Is the non-compete clause valid?";

        let a = PromptStyle::Focused.template().render(contract, question);
        let b = PromptStyle::Focused.template().render(contract, question);
        assert_eq!(a, b);
    }

    #[test]
    fn render_embeds_inputs_verbatim() {
        let contract = "WHEREAS § 910 applies to the undersigned…";
        let question = "Do any amendments need to be made on account of Brexit?";

        for style in [PromptStyle::Focused, PromptStyle::Comprehensive] {
            let p = style.template().render(contract, question);
            assert!(p.user.contains(contract), "{:?}", style);
            assert!(p.user.contains(question), "{:?}", style);
            assert!(!p.user.contains("{contract_text}"));
            assert!(!p.user.contains("{question_text}"));
        }
    }

    #[test]
    fn focused_has_larger_output_budget() {
        assert_eq!(PromptStyle::Focused.max_output_tokens(), 8000);
        assert_eq!(PromptStyle::Comprehensive.max_output_tokens(), 6000);
    }

    #[test]
    fn styles_have_distinct_report_defaults() {
        assert_ne!(
            PromptStyle::Focused.default_report_path(),
            PromptStyle::Comprehensive.default_report_path()
        );
        assert_ne!(
            PromptStyle::Focused.test_type(),
            PromptStyle::Comprehensive.test_type()
        );
    }

    #[test]
    fn contract_is_not_rescanned_for_placeholders() {
        // A contract quoting the placeholder literally must survive untouched.
        let contract = "the string {question_text} appears in this exhibit";
        let p = PromptStyle::Focused.template().render(contract, "Q?");
        assert!(p.user.contains("the string {question_text} appears"));
    }
}
