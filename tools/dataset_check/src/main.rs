use annotate_core::config::SessionConfig;
use annotate_core::dataset::model::Category;
use annotate_core::dataset::parser::load_dataset_csv;
use annotate_core::dataset::store::Progress;
use annotate_core::guidelines::index::load_guidelines_json;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Check that a dataset and its guidelines load, and report what is left to annotate.
#[derive(Parser, Debug)]
#[command(name = "dataset_check", version)]
struct Cli {
    #[arg(long)]
    data: PathBuf,

    #[arg(long)]
    guidelines: PathBuf,

    #[arg(long, env = "ANNOTATE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GuidelineSummary {
    content_labels: usize,
    determinant_labels: usize,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    overall: String, // PASS|FAIL
    dataset: String,
    columns: Vec<String>,
    progress: Option<Progress>,
    guidelines: Option<GuidelineSummary>,
    errors: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match SessionConfig::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            std::process::exit(2);
        }
    };

    let mut report = CheckReport {
        overall: "PASS".to_string(),
        dataset: cli.data.display().to_string(),
        columns: Vec::new(),
        progress: None,
        guidelines: None,
        errors: Vec::new(),
    };

    match load_dataset_csv(&cli.data) {
        Ok(ds) => {
            report.columns = ds.headers().iter().map(|h| h.to_string()).collect();
            report.progress = Some(ds.progress());
        }
        Err(e) => report.errors.push(format!("dataset: {}", e)),
    }
    match load_guidelines_json(&cli.guidelines, &config.guideline_keys) {
        Ok(set) => {
            report.guidelines = Some(GuidelineSummary {
                content_labels: set.entries(Category::Content).len(),
                determinant_labels: set.entries(Category::Determinant).len(),
            })
        }
        Err(e) => report.errors.push(format!("guidelines: {}", e)),
    }
    if !report.errors.is_empty() {
        report.overall = "FAIL".to_string();
    }

    match serde_json::to_string_pretty(&report) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("report error: {}", e);
            std::process::exit(1);
        }
    }
    if report.overall != "PASS" {
        std::process::exit(1);
    }
}
