//! Finding aggregation: one report value per analysis run.

use serde::Serialize;

use crate::detect::{self, DetectorConfig};
use crate::graph::RepoGraph;
use crate::model::RepoId;

/// Stable category keys, in report order. These are the serde field names of
/// [`AuditReport`], so serialized output and this list can never drift apart
/// without a test failing.
pub const CATEGORIES: [&str; 8] = [
    "cycles",
    "include_cycles",
    "remote_chains",
    "cross_instance_loops",
    "shadowed_repositories",
    "long_dependency_chains",
    "isolated_repositories",
    "remote_to_virtual",
];

/// The combined result of every detector, keyed by category.
///
/// Every category is always present; a clean graph serializes as eight
/// empty lists, not a smaller object. Findings are derived data and never
/// mutated after the sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Simple cycles over all relationship edges.
    pub cycles: Vec<Vec<RepoId>>,
    /// Simple cycles restricted to `includes` edges.
    pub include_cycles: Vec<Vec<RepoId>>,
    /// Forwarding paths through `remote` edges.
    pub remote_chains: Vec<Vec<RepoId>>,
    /// Cycles spanning two or more instances.
    pub cross_instance_loops: Vec<Vec<RepoId>>,
    /// Unordered pairs sharing a repository key across instances.
    pub shadowed_repositories: Vec<(RepoId, RepoId)>,
    /// Simple paths visiting more than the configured number of nodes.
    pub long_dependency_chains: Vec<Vec<RepoId>>,
    /// Local repositories nothing points at.
    pub isolated_repositories: Vec<RepoId>,
    /// Remote repositories with a direct edge to a virtual repository.
    pub remote_to_virtual: Vec<(RepoId, RepoId)>,
}

impl AuditReport {
    /// Run the full detector sweep over `graph`.
    ///
    /// Never fails, for any graph shape; see the complexity caveat on
    /// [`crate::detect`] for the two path-enumeration categories.
    #[must_use]
    pub fn detect(graph: &RepoGraph, config: &DetectorConfig) -> Self {
        Self {
            cycles: detect::simple_cycles(graph),
            include_cycles: detect::include_cycles(graph),
            remote_chains: detect::remote_chains(graph, config.remote_chain_hops),
            cross_instance_loops: detect::cross_instance_loops(graph),
            shadowed_repositories: detect::shadowed_repositories(graph),
            long_dependency_chains: detect::long_dependency_chains(graph, config.max_chain_len),
            isolated_repositories: detect::isolated_repositories(graph),
            remote_to_virtual: detect::remote_to_virtual(graph),
        }
    }

    /// Total number of findings across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cycles.len()
            + self.include_cycles.len()
            + self.remote_chains.len()
            + self.cross_instance_loops.len()
            + self.shadowed_repositories.len()
            + self.long_dependency_chains.len()
            + self.isolated_repositories.len()
            + self.remote_to_virtual.len()
    }

    /// True when no detector found anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Per-category finding counts, in [`CATEGORIES`] order.
    #[must_use]
    pub fn counts(&self) -> [(&'static str, usize); 8] {
        [
            ("cycles", self.cycles.len()),
            ("include_cycles", self.include_cycles.len()),
            ("remote_chains", self.remote_chains.len()),
            ("cross_instance_loops", self.cross_instance_loops.len()),
            ("shadowed_repositories", self.shadowed_repositories.len()),
            ("long_dependency_chains", self.long_dependency_chains.len()),
            ("isolated_repositories", self.isolated_repositories.len()),
            ("remote_to_virtual", self.remote_to_virtual.len()),
        ]
    }
}
