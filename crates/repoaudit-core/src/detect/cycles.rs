//! Cycle-family detectors: full cycles, include-only cycles, and loops
//! spanning multiple instances.

use std::collections::HashSet;

use crate::graph::{cycles, RepoGraph};
use crate::model::{EdgeKind, RepoId};

/// Every simple cycle in the relationship graph, each reported once up to
/// rotation. A repository forwarding to itself is a one-element cycle.
#[must_use]
pub fn simple_cycles(graph: &RepoGraph) -> Vec<Vec<RepoId>> {
    to_ids(graph, cycles::simple_cycles(graph.inner()))
}

/// Simple cycles using only `includes` edges: virtual repositories that
/// (possibly transitively) aggregate themselves.
#[must_use]
pub fn include_cycles(graph: &RepoGraph) -> Vec<Vec<RepoId>> {
    let sub = graph.edge_subgraph(EdgeKind::Includes);
    to_ids(&sub, cycles::simple_cycles(sub.inner()))
}

/// Simple cycles whose members span two or more instances.
///
/// Always a subset of [`simple_cycles`]: single-instance loops are a local
/// misconfiguration, cross-instance loops mean two deployments forward to
/// each other.
#[must_use]
pub fn cross_instance_loops(graph: &RepoGraph) -> Vec<Vec<RepoId>> {
    simple_cycles(graph)
        .into_iter()
        .filter(|cycle| {
            let instances: HashSet<&str> =
                cycle.iter().map(|id| id.instance.as_str()).collect();
            instances.len() > 1
        })
        .collect()
}

fn to_ids(graph: &RepoGraph, cycles: Vec<Vec<petgraph::graph::NodeIndex>>) -> Vec<Vec<RepoId>> {
    cycles
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|idx| graph.id_of(idx).clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InstanceSnapshot, RepoRecord, RepoType};

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
    fn mutual_remotes_form_one_cycle() {
        let instances = vec![InstanceSnapshot::new("alpha", "http://a/art")
            .with_repo("r1", remote("http://a/art/r2"))
            .with_repo("r2", remote("http://a/art/r1"))];
        let graph = RepoGraph::build(&instances);

        let found = simple_cycles(&graph);
        assert_eq!(found.len(), 1);
        let mut members = found[0].clone();
        members.sort();
        assert_eq!(
            members,
            vec![RepoId::new("alpha", "r1"), RepoId::new("alpha", "r2")]
        );
    }

    #[test]
    fn include_cycles_ignore_remote_edges() {
        // Remote 2-cycle plus an include 2-cycle; only the latter shows up.
        let instances = vec![InstanceSnapshot::new("alpha", "http://a/art")
            .with_repo("r1", remote("http://a/art/r2"))
            .with_repo("r2", remote("http://a/art/r1"))
            .with_repo("v1", virtual_of(&["v2"]))
            .with_repo("v2", virtual_of(&["v1"]))];
        let graph = RepoGraph::build(&instances);

        assert_eq!(simple_cycles(&graph).len(), 2);
        let include_only = include_cycles(&graph);
        assert_eq!(include_only.len(), 1);
        assert!(include_only[0].iter().all(|id| id.key.starts_with('v')));
    }

    #[test]
    fn cross_instance_filter_drops_local_loops() {
        let instances = vec![
            InstanceSnapshot::new("alpha", "http://a/art")
                .with_repo("r1", remote("http://a/art/r2"))
                .with_repo("r2", remote("http://a/art/r1"))
                .with_repo("x", remote("http://b/art/y")),
            InstanceSnapshot::new("beta", "http://b/art")
                .with_repo("y", remote("http://a/art/x")),
        ];
        let graph = RepoGraph::build(&instances);

        let all = simple_cycles(&graph);
        let cross = cross_instance_loops(&graph);
        assert_eq!(all.len(), 2);
        assert_eq!(cross.len(), 1);
        let instances_hit: std::collections::HashSet<&str> =
            cross[0].iter().map(|id| id.instance.as_str()).collect();
        assert_eq!(instances_hit.len(), 2);
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let instances = vec![InstanceSnapshot::new("alpha", "http://a/art")
            .with_repo("v1", virtual_of(&["l1"]))
            .with_repo("l1", RepoRecord::of_type(RepoType::Local))];
        let graph = RepoGraph::build(&instances);
        assert!(simple_cycles(&graph).is_empty());
        assert!(include_cycles(&graph).is_empty());
        assert!(cross_instance_loops(&graph).is_empty());
    }
}
