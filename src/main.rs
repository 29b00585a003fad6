use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wikisyn::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use wikisyn::extract::{run_extraction, PipelineConfig};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "wikisyn")]
#[command(about = "Build a synonym dictionary from Wikipedia redirect pages")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the Wikipedia dump file (.xml or .xml.bz2)
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Path of the synonym dictionary to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Limit number of pages to process (for testing)
    #[arg(long)]
    limit: Option<u64>,

    /// Dry run - don't write the output file
    #[arg(long)]
    dry_run: bool,

    /// Point redirects at the end of their redirect chain
    #[arg(long)]
    resolve_chains: bool,
}

fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig {
        input: cli.input,
        output: cli.output,
        limit: cli.limit,
        dry_run: cli.dry_run,
        resolve_chains: cli.resolve_chains,
    };

    info!(input = ?config.input, output = ?config.output, "Starting extraction");
    let start = Instant::now();
    let stats = run_extraction(&config)
        .with_context(|| format!("Failed to build synonyms from {:?}", config.input))?;
    let duration = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Total time:         {:.2}s", duration.as_secs_f64());
    println!();
    println!("Pages read:         {}", stats.pages_read);
    println!("Redirects seen:     {}", stats.redirects_seen);
    println!("Pairs accepted:     {}", stats.pairs_accepted);
    println!("Duplicate sources:  {}", stats.duplicates);
    println!("Namespace filtered: {}", stats.namespace_filtered);
    println!("Self-redirects:     {}", stats.self_redirects);
    println!("Malformed:          {}", stats.malformed);
    println!("Empty titles:       {}", stats.empty_titles);
    if config.resolve_chains {
        println!("Chains rewritten:   {}", stats.chains_rewritten);
        println!("Chains dropped:     {}", stats.chains_dropped);
    }
    if !config.dry_run {
        println!("Output:             {}", config.output.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
