//! `repoaudit audit` — fetch metadata, build the graph, run every detector.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use repoaudit_core::{detect, AuditReport, DetectorConfig, RepoGraph, RepoId};

use crate::client::MetadataClient;
use crate::config::AuditConfig;
use crate::output::{render, rule, section, OutputMode};

/// Arguments for `repoaudit audit`.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Path to the instances config file (.yaml, .yml, or .json).
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Also write the JSON report to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Maximum hops explored per remote forwarding chain.
    #[arg(long, default_value_t = 10)]
    pub remote_chain_hops: usize,

    /// A dependency chain is reported once it visits more than this many
    /// repositories.
    #[arg(long, default_value_t = 5)]
    pub max_chain_len: usize,

    /// Skip the path-enumeration analyses (remote chains, long dependency
    /// chains). Useful on dense graphs where exhaustive path enumeration
    /// is too expensive.
    #[arg(long)]
    pub skip_chains: bool,
}

/// Execute `repoaudit audit`.
pub fn run_audit(args: &AuditArgs, mode: OutputMode) -> Result<()> {
    let config = AuditConfig::load(&args.config)?;
    let problems = config.validate();
    if !problems.is_empty() {
        bail!("invalid config {}: {}", args.config.display(), problems.join("; "));
    }

    let client = MetadataClient::new();
    let snapshots = client.fetch_all(&config.instances);
    let graph = RepoGraph::build(&snapshots);

    let detector = DetectorConfig {
        remote_chain_hops: args.remote_chain_hops,
        max_chain_len: args.max_chain_len,
    };
    let report = if args.skip_chains {
        // Every analysis runs standalone; leave the two exponential ones out.
        AuditReport {
            cycles: detect::simple_cycles(&graph),
            include_cycles: detect::include_cycles(&graph),
            cross_instance_loops: detect::cross_instance_loops(&graph),
            shadowed_repositories: detect::shadowed_repositories(&graph),
            isolated_repositories: detect::isolated_repositories(&graph),
            remote_to_virtual: detect::remote_to_virtual(&graph),
            ..AuditReport::default()
        }
    } else {
        AuditReport::detect(&graph, &detector)
    };

    if let Some(path) = &args.out {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    render(mode, &report, |report, w| {
        render_report_human(report, graph.node_count(), graph.edge_count(), w)
    })
}

fn render_report_human(
    report: &AuditReport,
    nodes: usize,
    edges: usize,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    section(w, "Repository audit report")?;
    writeln!(w, "graph: {nodes} repositories, {edges} relationships")?;
    writeln!(w)?;

    for (category, count) in report.counts() {
        writeln!(w, "{category:<24} {count}")?;
    }

    if report.is_clean() {
        writeln!(w)?;
        writeln!(w, "No issues detected.")?;
        return Ok(());
    }

    render_path_category(w, "Cycles", &report.cycles)?;
    render_path_category(w, "Include-only cycles", &report.include_cycles)?;
    render_path_category(w, "Remote chains", &report.remote_chains)?;
    render_path_category(w, "Cross-instance loops", &report.cross_instance_loops)?;
    render_pair_category(w, "Shadowed repositories", &report.shadowed_repositories)?;
    render_path_category(w, "Long dependency chains", &report.long_dependency_chains)?;

    if !report.isolated_repositories.is_empty() {
        writeln!(w)?;
        rule(w)?;
        writeln!(w, "Isolated local repositories")?;
        for id in &report.isolated_repositories {
            writeln!(w, "  {id}")?;
        }
    }
    render_pair_category(w, "Remotes pointing at virtuals", &report.remote_to_virtual)?;

    Ok(())
}

fn render_path_category(
    w: &mut dyn Write,
    title: &str,
    paths: &[Vec<RepoId>],
) -> std::io::Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    rule(w)?;
    writeln!(w, "{title} ({})", paths.len())?;
    for path in paths {
        let joined: Vec<String> = path.iter().map(ToString::to_string).collect();
        writeln!(w, "  {}", joined.join(" -> "))?;
    }
    Ok(())
}

fn render_pair_category(
    w: &mut dyn Write,
    title: &str,
    pairs: &[(RepoId, RepoId)],
) -> std::io::Result<()> {
    if pairs.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    rule(w)?;
    writeln!(w, "{title} ({})", pairs.len())?;
    for (a, b) in pairs {
        writeln!(w, "  {a} <-> {b}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoaudit_core::{InstanceSnapshot, RepoRecord, RepoType};

    #[test]
    fn human_report_mentions_counts_and_findings() {
        let instances = vec![
            InstanceSnapshot::new("A", "http://a/art")
                .with_repo("shared", RepoRecord::of_type(RepoType::Local)),
            InstanceSnapshot::new("B", "http://b/art")
                .with_repo("shared", RepoRecord::of_type(RepoType::Local)),
        ];
        let graph = RepoGraph::build(&instances);
        let report = AuditReport::detect(&graph, &DetectorConfig::default());

        let mut buf = Vec::new();
        render_report_human(&report, graph.node_count(), graph.edge_count(), &mut buf)
            .expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("2 repositories"));
        let count_line = text
            .lines()
            .find(|line| line.starts_with("shadowed_repositories"))
            .expect("count line");
        assert!(count_line.ends_with('1'));
        assert!(text.contains("A:shared <-> B:shared"));
    }

    #[test]
    fn clean_graph_renders_no_issues() {
        let graph = RepoGraph::build(&[]);
        let report = AuditReport::detect(&graph, &DetectorConfig::default());

        let mut buf = Vec::new();
        render_report_human(&report, 0, 0, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("No issues detected."));
    }
}
