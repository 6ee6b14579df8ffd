//! Chain detectors: remote forwarding chains and long dependency chains.
//!
//! Both are deliberately exhaustive (every distinct path, not just a
//! reachability witness) and therefore exponential on dense graphs. The
//! cutoffs in [`crate::detect::DetectorConfig`] are the only bounds.

use petgraph::Direction;

use crate::graph::{all_simple_paths_up_to, RepoGraph};
use crate::model::{EdgeKind, RepoId};

/// Every simple forwarding path through `remote` edges, up to `max_hops`
/// edges long.
///
/// Direct edges count: a remote pointing straight at another repository is
/// the degenerate one-hop chain, and consumers filter by length if they
/// only care about multi-hop forwarding.
#[must_use]
pub fn remote_chains(graph: &RepoGraph, max_hops: usize) -> Vec<Vec<RepoId>> {
    let sub = graph.edge_subgraph(EdgeKind::Remote);
    let inner = sub.inner();

    let mut found: Vec<Vec<RepoId>> = Vec::new();
    for source in inner.node_indices() {
        // Only nodes that forward anywhere can start a chain.
        if inner
            .neighbors_directed(source, Direction::Outgoing)
            .next()
            .is_none()
        {
            continue;
        }
        for target in inner.node_indices() {
            if source == target {
                continue;
            }
            for path in all_simple_paths_up_to(inner, source, target, max_hops) {
                found.push(path.into_iter().map(|idx| sub.id_of(idx).clone()).collect());
            }
        }
    }
    found.sort_unstable();
    found
}

/// Every simple path (any edge kind) visiting more than `max_len` nodes.
///
/// Exploration is bounded at `max_len + 1` nodes, so reported chains have
/// exactly `max_len + 1` members; the cutoff is measured in nodes, endpoints
/// included.
#[must_use]
pub fn long_dependency_chains(graph: &RepoGraph, max_len: usize) -> Vec<Vec<RepoId>> {
    let inner = graph.inner();
    // `max_len + 1` nodes means `max_len` hops.
    let max_hops = max_len;

    let mut found: Vec<Vec<RepoId>> = Vec::new();
    for source in inner.node_indices() {
        for target in inner.node_indices() {
            if source == target {
                continue;
            }
            for path in all_simple_paths_up_to(inner, source, target, max_hops) {
                if path.len() > max_len {
                    found.push(path.into_iter().map(|idx| graph.id_of(idx).clone()).collect());
                }
            }
        }
    }
    found.sort_unstable();
    found
}
