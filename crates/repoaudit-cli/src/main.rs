#![forbid(unsafe_code)]

mod client;
mod cmd;
mod config;
mod output;

use std::env;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "repoaudit: Artifactory repository configuration auditor",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> output::OutputMode {
        output::OutputMode::from_json_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Fetch repository metadata and audit the relationship graph",
        after_help = "EXAMPLES:\n    # Audit the instances listed in config.yaml\n    repoaudit audit\n\n    # Machine-readable report, also saved to a file\n    repoaudit audit --json --out report.json"
    )]
    Audit(cmd::audit::AuditArgs),

    #[command(
        about = "Validate a config file without contacting any instance",
        after_help = "EXAMPLES:\n    # Check the default config\n    repoaudit check\n\n    # Check a specific file\n    repoaudit check --config staging.json"
    )]
    Check(cmd::check::CheckArgs),
}

fn init_tracing(verbose: bool) {
    // `REPOAUDIT_LOG` takes precedence; the flag sets the default filter.
    let filter = EnvFilter::try_from_env("REPOAUDIT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "repoaudit_core=debug,repoaudit_cli=debug,info"
        } else {
            "repoaudit=info,warn"
        })
    });

    let format = env::var("REPOAUDIT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match cli.command {
        Commands::Audit(ref args) => cmd::audit::run_audit(args, output),
        Commands::Check(ref args) => cmd::check::run_check(args, output),
    }
}
