//! Isolated local repositories: local repos nothing points at.
//!
//! A local repository with zero in-degree is aggregated by no virtual and
//! proxied by no remote, which often marks a leftover. Remote and virtual
//! repositories with no inbound edges are normal entry points and are not
//! reported.

use crate::graph::RepoGraph;
use crate::model::{RepoId, RepoType};

/// Every local repository with no incoming relationship edge, sorted.
#[must_use]
pub fn isolated_repositories(graph: &RepoGraph) -> Vec<RepoId> {
    let mut isolated: Vec<RepoId> = graph
        .inner()
        .node_indices()
        .filter(|&idx| graph.in_degree(idx) == 0)
        .filter_map(|idx| {
            let node = graph.node(idx)?;
            (node.repo_type == RepoType::Local).then(|| node.id.clone())
        })
        .collect();
    isolated.sort_unstable();
    isolated
}
