use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sampleseek::{Config, ExecutionMode};

#[derive(Parser)]
#[command(name = "sampleseek", about = "Find the samples in a project that match every search token")]
struct Cli {
    /// JSON dataset to search (projects, samples, methods, stages).
    #[arg(long, short)]
    data: PathBuf,

    /// Externally-facing project id to search within.
    #[arg(long, short)]
    project: String,

    /// Config file to use instead of ~/.config/sampleseek/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force sequential matcher execution.
    #[arg(long)]
    sequential: bool,

    /// Log at debug level to stderr.
    #[arg(long)]
    debug: bool,

    /// Search tokens. Each argument is split on whitespace.
    tokens: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load()?,
    };
    if cli.sequential {
        config.resolver.execution = ExecutionMode::Sequential;
    }

    let filter = if cli.debug { "debug" } else { config.logging.filter.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let resolver = sampleseek::open(&cli.data, &config.resolver)
        .with_context(|| format!("opening dataset {}", cli.data.display()))?;
    let tokens = sampleseek::tokenize(&cli.tokens);
    tracing::debug!(tokens = ?tokens, project = %cli.project, "resolving query");

    let mut samples = resolver.resolve(&tokens, &cli.project).await?;
    samples.sort_by(|a, b| a.obfuscated_id.cmp(&b.obfuscated_id));
    println!("{}", serde_json::to_string_pretty(&samples)?);
    Ok(())
}
