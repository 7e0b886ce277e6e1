use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use capwrap_codegen::{generate, Options, SegmentResolver};
use clap::Parser;
use tracing::info;

/// Generate capability-preserving wrapper factories from annotated traits
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Annotated source file
    #[arg(long)]
    src: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(long)]
    dst: Option<PathBuf>,

    /// Marker prefix of directive comments
    #[arg(long, default_value = "capwrap")]
    marker: String,

    /// Path of the runtime crate used by the generated code
    #[arg(long, default_value = "::capwrap")]
    runtime: String,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "capwrap=info",
        1 => "capwrap=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

/// Generates from `--src`; `--dst` is only written once generation succeeded.
fn run(cli: &Cli) -> Result<()> {
    let runtime: syn::Path = syn::parse_str(&cli.runtime)
        .with_context(|| format!("invalid runtime path `{}`", cli.runtime))?;
    let options = Options::default()
        .with_marker(cli.marker.as_str())
        .with_runtime(runtime);

    let source = fs::read_to_string(&cli.src)
        .with_context(|| format!("failed to read {}", cli.src.display()))?;
    let output = generate(&source, &SegmentResolver, &options)
        .with_context(|| format!("failed to generate wrappers for {}", cli.src.display()))?;

    match &cli.dst {
        Some(dst) => {
            fs::write(dst, &output).with_context(|| format!("failed to write {}", dst.display()))?;
            info!(src = %cli.src.display(), dst = %dst.display(), "wrappers generated");
        }
        None => print!("{output}"),
    }
    Ok(())
}
