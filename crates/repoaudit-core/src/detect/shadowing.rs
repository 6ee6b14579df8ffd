//! Repository shadowing: the same key defined on multiple instances.
//!
//! Shared keys are not inherently wrong, but combined with remote-URL
//! resolution they make it easy to point at the wrong deployment's copy.

use std::collections::BTreeMap;

use crate::graph::RepoGraph;
use crate::model::RepoId;

/// Every unordered pair of repositories sharing a key across at least two
/// instances.
///
/// Pairs are the full pairwise cross-product within each key group, each
/// reported exactly once with the lexicographically smaller member first.
#[must_use]
pub fn shadowed_repositories(graph: &RepoGraph) -> Vec<(RepoId, RepoId)> {
    let mut by_key: BTreeMap<&str, Vec<&RepoId>> = BTreeMap::new();
    for node in graph.inner().node_weights() {
        by_key.entry(node.id.key.as_str()).or_default().push(&node.id);
    }

    let mut pairs: Vec<(RepoId, RepoId)> = Vec::new();
    for ids in by_key.values_mut() {
        if ids.len() < 2 {
            continue;
        }
        ids.sort_unstable();
        let spans_instances = ids
            .windows(2)
            .any(|pair| pair[0].instance != pair[1].instance);
        if !spans_instances {
            continue;
        }
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                pairs.push(((*a).clone(), (*b).clone()));
            }
        }
    }
    pairs
}
