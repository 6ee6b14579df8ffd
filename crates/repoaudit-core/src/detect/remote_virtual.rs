//! Remote repositories pointing at virtual aggregators.
//!
//! A remote proxying a virtual repository hides which concrete repository
//! actually serves each artifact; the usual fix is pointing the remote at a
//! specific local or remote repository instead. This is a direct-edge check
//! only; transitive reachability of a virtual is not an issue by itself.

use petgraph::Direction;

use crate::graph::RepoGraph;
use crate::model::{RepoId, RepoType};

/// Every `(remote, virtual)` pair where the remote has a direct edge to the
/// virtual repository, sorted.
#[must_use]
pub fn remote_to_virtual(graph: &RepoGraph) -> Vec<(RepoId, RepoId)> {
    let inner = graph.inner();
    let mut pairs: Vec<(RepoId, RepoId)> = Vec::new();

    for idx in inner.node_indices() {
        let Some(node) = graph.node(idx) else {
            continue;
        };
        if node.repo_type != RepoType::Remote {
            continue;
        }
        for successor in inner.neighbors_directed(idx, Direction::Outgoing) {
            if let Some(target) = graph.node(successor) {
                if target.repo_type == RepoType::Virtual {
                    pairs.push((node.id.clone(), target.id.clone()));
                }
            }
        }
    }
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InstanceSnapshot, RepoRecord};

    fn remote(url: &str) -> RepoRecord {
        RepoRecord {
            url: Some(url.to_string()),
            ..RepoRecord::of_type(RepoType::Remote)
        }
    }

    fn virtual_of(includes: &[&str]) -> RepoRecord {
        RepoRecord {
            repositories: includes.iter().map(ToString::to_string).collect(),
            ..RepoRecord::of_type(RepoType::Virtual)
        }
    }

    #[test]
    fn remote_pointing_at_virtual_is_reported() {
        let instances = vec![
            InstanceSnapshot::new("alpha", "http://a/art")
                .with_repo("v1", virtual_of(&["l1"]))
                .with_repo("l1", RepoRecord::of_type(RepoType::Local)),
            InstanceSnapshot::new("beta", "http://b/art")
                .with_repo("r1", remote("http://a/art/v1")),
        ];
        let graph = RepoGraph::build(&instances);
        assert_eq!(
            remote_to_virtual(&graph),
            vec![(RepoId::new("beta", "r1"), RepoId::new("alpha", "v1"))]
        );
    }

    #[test]
    fn remote_pointing_at_local_is_fine() {
        let instances = vec![InstanceSnapshot::new("alpha", "http://a/art")
            .with_repo("r1", remote("http://a/art/l1"))
            .with_repo("l1", RepoRecord::of_type(RepoType::Local))];
        let graph = RepoGraph::build(&instances);
        assert!(remote_to_virtual(&graph).is_empty());
    }

    #[test]
    fn only_direct_successors_count() {
        // r1 → r2 → v1: r1 reaches a virtual only transitively.
        let instances = vec![InstanceSnapshot::new("alpha", "http://a/art")
            .with_repo("r1", remote("http://a/art/r2"))
            .with_repo("r2", remote("http://a/art/v1"))
            .with_repo("v1", virtual_of(&[]))];
        let graph = RepoGraph::build(&instances);
        assert_eq!(
            remote_to_virtual(&graph),
            vec![(RepoId::new("alpha", "r2"), RepoId::new("alpha", "v1"))]
        );
    }
}
