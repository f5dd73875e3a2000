use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use str_intel::config::{self, PipelineConfig};
use str_intel::pipeline::import::DocumentUpload;
use str_intel::pipeline::opportunity::StaticDisabilityProfile;

#[derive(Parser)]
#[command(name = config::APP_NAME)]
#[command(version = config::APP_VERSION)]
#[command(about = "Extract entries and claim opportunities from service treatment records")]
struct Cli {
    /// Text export of the record (pages separated by form feeds)
    file: PathBuf,
    /// Volume label stored on the document
    #[arg(long)]
    volume: Option<String>,
    /// Condition already on the disability profile (repeatable)
    #[arg(long = "claimed", value_name = "NAME")]
    claimed: Vec<String>,
    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{} error: {error:#}", config::APP_NAME);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    str_intel::init_tracing();

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let filename = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let profile = Arc::new(StaticDisabilityProfile::new(cli.claimed));
    let coordinator = str_intel::build_coordinator(PipelineConfig::from_env(), profile);

    let result = coordinator
        .process(DocumentUpload::new(filename, bytes, cli.volume))
        .await
        .context("document processing failed")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}
