#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;

use lexbench::config::{Env, EnvFile, VertexConfig};
use lexbench::contracts::ContractStore;
use lexbench::gateway::{GeminiVertexClient, ProviderClient};
use lexbench::prompts::PromptStyle;
use lexbench::questions::{default_questions, load_questions, QuestionFilter};
use lexbench::report::{write_report, RunReport};
use lexbench::runner::TestRunner;

#[derive(Parser)]
#[command(
    name = "lexbench",
    version,
    about = "Benchmark search-grounded LLM legal contract analysis"
)]
struct Cli {
    /// Seconds to wait between questions
    #[arg(long, default_value_t = 15.0)]
    rate_limit: f64,

    /// Which questions to run: "all" or comma-separated ids like "1A,5A"
    #[arg(long, default_value = "all")]
    questions: String,

    /// Google Cloud project ID (or set GOOGLE_CLOUD_PROJECT)
    #[arg(long)]
    project_id: Option<String>,

    /// Google Cloud location (or set GOOGLE_CLOUD_LOCATION; default: us-central1)
    #[arg(long)]
    location: Option<String>,

    /// Model to benchmark
    #[arg(long, default_value = "gemini-2.0-flash-exp")]
    model: String,

    /// Prompt variant: focused (8000-token budget) or comprehensive (6000)
    #[arg(long, value_enum, default_value = "focused")]
    style: CliPromptStyle,

    /// JSON file with question specs (defaults to the built-in set)
    #[arg(long)]
    questions_file: Option<PathBuf>,

    /// Contract directory override
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Report output path (default depends on --style)
    #[arg(long)]
    out: Option<PathBuf>,

    /// key=value file consulted for credentials
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

/// CLI-facing prompt style enum (clap::ValueEnum).
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPromptStyle {
    Focused,
    Comprehensive,
}

impl From<CliPromptStyle> for PromptStyle {
    fn from(s: CliPromptStyle) -> Self {
        match s {
            CliPromptStyle::Focused => PromptStyle::Focused,
            CliPromptStyle::Comprehensive => PromptStyle::Comprehensive,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let style = PromptStyle::from(cli.style);

    println!("{}", "=".repeat(80));
    println!("LEXBENCH - GOOGLE SEARCH GROUNDING");
    println!("{}", "=".repeat(80));
    println!("Model: {}", cli.model);
    println!("Platform: Vertex AI");
    println!("Search: Google Search grounding enabled");
    println!("Style: {style:?}");
    println!("Rate limit: {}s between questions", cli.rate_limit);
    println!();

    let env = Env::with_file(EnvFile::load(&cli.env_file));
    let config = VertexConfig::resolve(cli.project_id, cli.location, &env).map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("required setup:");
        eprintln!("  1. Set GOOGLE_CLOUD_PROJECT in .env or use --project-id");
        eprintln!("  2. Set GOOGLE_ACCESS_TOKEN (gcloud auth print-access-token)");
        eprintln!("  3. Enable the Vertex AI API in your Google Cloud project");
        e
    })?;
    println!(
        "Vertex AI configured: project={}, location={}",
        config.project_id, config.location
    );

    let specs = match &cli.questions_file {
        Some(path) => load_questions(path)?,
        None => default_questions(),
    };
    let filter = QuestionFilter::parse(&cli.questions);

    let contracts = match cli.data_dir {
        Some(dir) => ContractStore::at(dir),
        None => ContractStore::default_dirs(),
    };

    let client = GeminiVertexClient::new(&config, cli.model.clone(), style)?;
    let runner = TestRunner::new(contracts, client);

    let records = runner.run(&specs, &filter, cli.rate_limit).await?;

    let report = RunReport {
        test_date: chrono::Local::now().to_rfc3339(),
        test_type: style.test_type().to_string(),
        model: runner.provider().model_id().to_string(),
        platform: "vertex_ai".to_string(),
        project_id: config.project_id.clone(),
        location: config.location.clone(),
        description: style.description().to_string(),
        total_questions: records.len(),
        results: records,
    };

    let out = cli
        .out
        .unwrap_or_else(|| PathBuf::from(style.default_report_path()));
    write_report(&report, &out)?;

    println!();
    println!("{}", "=".repeat(80));
    println!("Benchmark complete: {} question(s)", report.total_questions);
    println!("Results saved to: {}", out.display());
    println!("{}", "=".repeat(80));

    Ok(())
}
