// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: fatal errors are reported on stderr before exiting with status 2.
#![allow(clippy::print_stderr)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use policy_snippet_validator::{FsSourceConfig, output, validate_fs};

/// Exit status when the environment prevents a scan.
const EXIT_ENVIRONMENT: u8 = 2;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "policy-snippet-validator",
    version,
    about = "Validate traffic policy YAML/JSON code blocks in documentation"
)]
struct Cli {
    /// Documentation root containing the traffic-policy, snippets and gateway docs
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the scan and render it; `Ok(true)` when every block passed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = FsSourceConfig::for_root(&cli.root);
    tracing::info!(root = %cli.root.display(), "scanning documentation");

    let report = validate_fs(&config)
        .with_context(|| format!("Failed to scan {}", cli.root.display()))?;

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        OutputFormat::Human => output::write_human(&report, &mut stdout)?,
        OutputFormat::Json => output::write_json(&report, &mut stdout)?,
    }
    stdout.flush()?;

    Ok(report.ok())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ENVIRONMENT)
        }
    }
}
