use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use document_renamer::{
    batch_process, DocStatus, FilenameBuilder, PdfiumTextSource, RenamerConfig, VendorRegistry,
};

/// Batch document renamer - standardizes vendor document filenames from
/// content and metadata.
#[derive(Parser)]
#[command(name = "document-renamer", version)]
struct Cli {
    /// Directory containing files to process
    directory: PathBuf,

    /// Document status: draft (uses modified date) or executed (extracts
    /// date from PDF text)
    #[arg(long)]
    status: String,

    /// File pattern for batch processing (default: * for all files)
    #[arg(long, default_value = "*")]
    pattern: String,

    /// Actually rename files (default is preview only)
    #[arg(long)]
    rename: bool,

    /// Path to the vendor registry CSV
    #[arg(long, default_value = "vendors.csv")]
    registry: PathBuf,

    /// Print the batch report as JSON after the run
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let status: DocStatus = cli.status.parse()?;
    let config = RenamerConfig::default();

    println!("Initializing document renamer...");
    let registry = VendorRegistry::from_csv(&cli.registry, &config)?;
    println!(
        "✓ Loaded {} vendor records from {}",
        registry.len(),
        cli.registry.display()
    );

    let pdf = PdfiumTextSource::new();
    let builder = FilenameBuilder::new(&registry, &config, &pdf);

    let results = batch_process(&builder, &cli.directory, status, &cli.pattern, cli.rename)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
