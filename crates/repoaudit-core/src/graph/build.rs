//! Graph construction from fetched instance snapshots.
//!
//! # Build Order
//!
//! Nodes for **every** instance are inserted before any edge, because remote
//! edges may target repositories on a different instance than their source.
//! Edge resolution therefore needs the complete cross-instance node set.
//!
//! # Edge Semantics
//!
//! - `Remote`: the source remote repository's backing URL resolved (via the
//!   [`ResolveTarget`] strategy) to a known repository.
//! - `Includes`: the source virtual repository lists the target in its
//!   include list; only same-instance targets are modeled.
//!
//! Unresolvable URLs and unknown include names are absorbed silently; the
//! resolution heuristic is best-effort and false negatives are expected.
//! Each `(source, target)` pair holds at most one edge; a repeated
//! derivation overwrites the edge kind rather than adding a parallel edge.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, info};

use crate::model::{EdgeKind, InstanceSnapshot, RepoId, RepoType};
use crate::resolve::{PrefixResolver, ResolveTarget};

/// Node payload: identity plus the attributes detectors care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoNode {
    pub id: RepoId,
    pub repo_type: RepoType,
    pub package_type: String,
}

/// Directed, typed-edge relationship graph over all fetched repositories.
///
/// Immutable once built: detectors borrow it read-only, and a new analysis
/// run constructs a fresh value.
#[derive(Debug)]
pub struct RepoGraph {
    graph: DiGraph<RepoNode, EdgeKind>,
    node_map: HashMap<RepoId, NodeIndex>,
}

impl RepoGraph {
    /// Build the relationship graph using the default URL resolution
    /// strategy ([`PrefixResolver`]).
    #[must_use]
    pub fn build(instances: &[InstanceSnapshot]) -> Self {
        Self::build_with(instances, &PrefixResolver)
    }

    /// Build the relationship graph with a caller-supplied URL resolver.
    ///
    /// Never fails: malformed records degrade to `unknown` attributes and
    /// unresolved relationships are simply omitted.
    #[must_use]
    pub fn build_with(instances: &[InstanceSnapshot], resolver: &dyn ResolveTarget) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<RepoId, NodeIndex> = HashMap::new();

        // Pass 1: all nodes, across all instances.
        for instance in instances {
            for (key, record) in &instance.repositories {
                let id = RepoId::new(&instance.name, key);
                if node_map.contains_key(&id) {
                    // Duplicate instance name in the input; first record wins.
                    debug!(%id, "duplicate repository identity, skipping");
                    continue;
                }
                let idx = graph.add_node(RepoNode {
                    id: id.clone(),
                    repo_type: record.repo_type,
                    package_type: record.package_type.clone(),
                });
                node_map.insert(id, idx);
            }
        }

        // Pass 2: remote edges, resolved against the full node set.
        for instance in instances {
            for (key, record) in &instance.repositories {
                if record.repo_type != RepoType::Remote {
                    continue;
                }
                // A declared remote without a URL is a malformed record;
                // it stays in the graph as an edgeless node.
                let Some(url) = record.url.as_deref() else {
                    continue;
                };
                let Some(target) = resolver.resolve(url, instances) else {
                    continue;
                };
                let source = RepoId::new(&instance.name, key);
                if let (Some(&s), Some(&t)) = (node_map.get(&source), node_map.get(&target)) {
                    graph.update_edge(s, t, EdgeKind::Remote);
                    debug!(%source, %target, "remote edge");
                }
            }
        }

        // Pass 3: include edges, same-instance only.
        for instance in instances {
            for (key, record) in &instance.repositories {
                if record.repo_type != RepoType::Virtual {
                    continue;
                }
                let source = RepoId::new(&instance.name, key);
                for included in &record.repositories {
                    let target = RepoId::new(&instance.name, included);
                    if let (Some(&s), Some(&t)) = (node_map.get(&source), node_map.get(&target)) {
                        graph.update_edge(s, t, EdgeKind::Includes);
                        debug!(%source, %target, "include edge");
                    }
                }
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built repository graph"
        );
        Self { graph, node_map }
    }

    /// The underlying petgraph structure, for algorithm-level access.
    #[must_use]
    pub const fn inner(&self) -> &DiGraph<RepoNode, EdgeKind> {
        &self.graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the graph index for a repository identity.
    #[must_use]
    pub fn node_index(&self, id: &RepoId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// The node payload at `idx`, if present.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> Option<&RepoNode> {
        self.graph.node_weight(idx)
    }

    /// The repository identity at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph. Detectors only pass
    /// indices obtained from the same graph, so this is an internal
    /// contract, not a caller-facing one.
    #[must_use]
    pub fn id_of(&self, idx: NodeIndex) -> &RepoId {
        &self.graph[idx].id
    }

    /// Whether an edge of the given kind links `source` to `target`.
    #[must_use]
    pub fn has_edge(&self, source: &RepoId, target: &RepoId, kind: EdgeKind) -> bool {
        let (Some(s), Some(t)) = (self.node_index(source), self.node_index(target)) else {
            return false;
        };
        self.graph
            .find_edge(s, t)
            .is_some_and(|e| self.graph[e] == kind)
    }

    /// Number of edges pointing at `idx`.
    #[must_use]
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// A copy of this graph containing all nodes but only edges of `kind`.
    ///
    /// Node indices are preserved, so indices from the subgraph are valid in
    /// the original and vice versa.
    #[must_use]
    pub fn edge_subgraph(&self, kind: EdgeKind) -> Self {
        let mut graph = DiGraph::with_capacity(self.graph.node_count(), 0);
        for node in self.graph.node_weights() {
            graph.add_node(node.clone());
        }
        for edge in self.graph.edge_references() {
            if *edge.weight() == kind {
                graph.add_edge(edge.source(), edge.target(), kind);
            }
        }
        Self {
            graph,
            node_map: self.node_map.clone(),
        }
    }
}
