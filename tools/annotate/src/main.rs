mod shell;

use annotate_core::config::SessionConfig;
use annotate_core::dataset::model::Category;
use annotate_core::dataset::parser::load_dataset_csv;
use annotate_core::guidelines::index::load_guidelines_json;
use annotate_core::review::session::SessionState;
use anyhow::{Context, Result};
use clap::Parser;
use shell::Shell;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Walk through automatically generated labels and validate or override them.
#[derive(Parser, Debug)]
#[command(name = "annotate", version)]
struct Cli {
    /// CSV with the sentences and automatic labels
    #[arg(long)]
    data: PathBuf,

    /// JSON with the label explanations per category
    #[arg(long)]
    guidelines: PathBuf,

    /// Where to write the annotated CSV (defaults to the configured file name)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Category to start with
    #[arg(long)]
    category: Option<Category>,

    /// TOML session config
    #[arg(long, env = "ANNOTATE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directive, used when RUST_LOG is unset
    #[arg(long, env = "ANNOTATE_LOG")]
    log: Option<String>,

    /// Do not write the CSV when the session ends
    #[arg(long)]
    no_export: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("annotate: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = SessionConfig::load_or_default(cli.config.as_deref())
        .context("cannot load session config")?;
    init_tracing(cli.log.as_deref().unwrap_or(&config.log_level));

    let dataset = load_dataset_csv(&cli.data)
        .with_context(|| format!("cannot load dataset '{}'", cli.data.display()))?;
    let guidelines = load_guidelines_json(&cli.guidelines, &config.guideline_keys)
        .with_context(|| format!("cannot load guidelines '{}'", cli.guidelines.display()))?;

    let state = SessionState::new(cli.category.unwrap_or(config.start_category));
    let export_path = cli
        .out
        .unwrap_or_else(|| PathBuf::from(&config.export_file_name));
    tracing::info!(
        rows = dataset.len(),
        category = %state.category,
        export = %export_path.display(),
        "session started"
    );

    let mut shell = Shell::new(dataset, guidelines, state, export_path);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let session = shell.run(stdin.lock(), &mut stdout);
    if let Err(e) = &session {
        tracing::error!(error = %e, "session ended early");
    }
    writeln!(stdout)?;
    stdout.flush()?;

    // Annotations are written out even when the session ended on an error.
    if !cli.no_export {
        let receipt = shell.export()?;
        println!(
            "exported {} rows to {} (sha256 {})",
            receipt.rows, receipt.path, receipt.sha256
        );
    }
    session
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
