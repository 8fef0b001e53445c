use clap::Parser;
use flowscope::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Classifies a design export and detects its user flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the design export JSON file
    export_path: String,

    /// Optional path to an engine configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v flag when set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to install logger: {}", e)));

    let total_start = Instant::now();

    // --- 1. File Loading ---
    let export_json = fs::read_to_string(&cli.export_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read export file '{}': {}",
            &cli.export_path, e
        ))
    });
    let config = match &cli.config {
        Some(path) => {
            let config_json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            EngineConfig::from_json(&config_json)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)))
        }
        None => EngineConfig::default(),
    };

    // --- 2. Parsing and Conversion ---
    let forest = RawDocument::from_json(&export_json)
        .and_then(|doc| doc.into_forest().map_err(IngestError::from))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load export: {}", e)));

    // --- 3. Analysis ---
    let pipeline = KnowledgePipeline::builder(config)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)));
    let analysis_start = Instant::now();
    let report = pipeline.analyze(&forest);
    let analysis_duration = analysis_start.elapsed();

    // --- 4. Output ---
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize report: {}", e)));
        println!("{}", json);
    } else {
        println!("{}", ReportFormatter::format_report(&report));
        println!("--- Performance Summary ---");
        println!("Analysis:         {:?}", analysis_duration);
        println!("Total Execution:  {:?}", total_start.elapsed());
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
