//! `repoaudit check` — validate a config file without touching the network.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::config::AuditConfig;
use crate::output::{render, section, OutputMode};

/// Arguments for `repoaudit check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the instances config file (.yaml, .yml, or .json).
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Debug, Serialize)]
struct CheckSummary {
    config: String,
    instances: usize,
}

/// Execute `repoaudit check`.
pub fn run_check(args: &CheckArgs, mode: OutputMode) -> Result<()> {
    let config = AuditConfig::load(&args.config)?;
    let problems = config.validate();
    if !problems.is_empty() {
        bail!(
            "invalid config {}: {}",
            args.config.display(),
            problems.join("; ")
        );
    }

    let summary = CheckSummary {
        config: args.config.display().to_string(),
        instances: config.instances.len(),
    };
    render(mode, &summary, |summary, w| {
        section(w, "Config check")?;
        writeln!(w, "{}: ok ({} instances)", summary.config, summary.instances)
    })
}
