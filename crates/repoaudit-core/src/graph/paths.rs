//! Bounded simple-path enumeration.
//!
//! Thin wrapper over [`petgraph::algo::all_simple_paths`] that fixes the
//! cutoff unit once: **hops** (edge count), so a path of `h` hops visits
//! `h + 1` nodes. The chain detectors build their node-count limits on top
//! of this single definition.

use petgraph::graph::{DiGraph, NodeIndex};

/// All simple paths from `from` to `to` using at most `max_hops` edges.
///
/// `from` and `to` must be distinct; passing equal endpoints yields nothing
/// (cycle enumeration is [`super::cycles::simple_cycles`]' job). Output and
/// runtime are exponential in the worst case; the cutoff is the only bound.
#[must_use]
pub fn all_simple_paths_up_to<N, E>(
    graph: &DiGraph<N, E>,
    from: NodeIndex,
    to: NodeIndex,
    max_hops: usize,
) -> Vec<Vec<NodeIndex>> {
    if from == to || max_hops == 0 {
        return Vec::new();
    }
    // petgraph bounds by intermediate nodes: a path of `h` hops has `h - 1`
    // nodes between its endpoints.
    petgraph::algo::all_simple_paths::<Vec<NodeIndex>, _>(graph, from, to, 0, Some(max_hops - 1))
        .collect()
}
