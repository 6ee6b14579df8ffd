//! Exhaustive simple-cycle enumeration.
//!
//! Johnson's algorithm over the petgraph structure: Tarjan SCC decomposition
//! narrows the search to strongly connected components, then a blocked-set
//! circuit search enumerates every elementary cycle within each component.
//! Each cycle is reported exactly once, rotated so its smallest node index
//! comes first, and the result list is sorted for deterministic output.
//!
//! Worst-case output (and therefore runtime) is exponential in graph size;
//! repository graphs are small enough in practice that this is acceptable.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::NodeFiltered;

/// Enumerate every simple (elementary) directed cycle in `graph`.
///
/// Self-loops are reported as one-element cycles. A cycle's node sequence
/// follows edge direction and contains no repeated node; the implicit
/// closing edge back to the first node is not repeated in the output.
#[must_use]
pub fn simple_cycles<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut cycles: Vec<Vec<NodeIndex>> = Vec::new();

    // Self-loops first; the circuit search below skips them.
    for idx in graph.node_indices() {
        if graph.find_edge(idx, idx).is_some() {
            cycles.push(vec![idx]);
        }
    }

    // Work queue of non-trivial SCCs still to be searched.
    let mut pending: Vec<Vec<NodeIndex>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect();

    while let Some(scc) = pending.pop() {
        let Some(&start) = scc.iter().min() else {
            continue;
        };
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();

        let mut search = Circuit {
            graph,
            members: &members,
            blocked: HashSet::new(),
            unblock_on: HashMap::new(),
            path: Vec::new(),
            found: &mut cycles,
        };
        search.run(start, start);

        // Every cycle through `start` is now recorded; drop it and re-SCC
        // the remainder to find cycles avoiding it.
        let rest: HashSet<NodeIndex> = members.iter().copied().filter(|&n| n != start).collect();
        if rest.len() > 1 {
            let filtered = NodeFiltered::from_fn(graph, |n| rest.contains(&n));
            pending.extend(
                tarjan_scc(&filtered)
                    .into_iter()
                    .filter(|scc| scc.len() > 1),
            );
        }
    }

    for cycle in &mut cycles {
        rotate_to_min(cycle);
    }
    cycles.sort_unstable();
    cycles
}

/// Rotate a cycle in place so its smallest node index comes first.
///
/// Rotation preserves cycle identity (a cycle is a closed path, so any
/// starting point names the same cycle) and makes output deterministic.
fn rotate_to_min(cycle: &mut [NodeIndex]) {
    if let Some(pos) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, idx)| **idx)
        .map(|(pos, _)| pos)
    {
        cycle.rotate_left(pos);
    }
}

/// Blocked-set circuit search state (Johnson 1975), scoped to one SCC.
struct Circuit<'a, N, E> {
    graph: &'a DiGraph<N, E>,
    members: &'a HashSet<NodeIndex>,
    blocked: HashSet<NodeIndex>,
    /// `unblock_on[w]` holds nodes to unblock when `w` becomes unblocked.
    unblock_on: HashMap<NodeIndex, HashSet<NodeIndex>>,
    path: Vec<NodeIndex>,
    found: &'a mut Vec<Vec<NodeIndex>>,
}

impl<N, E> Circuit<'_, N, E> {
    /// Explore from `v`, recording every path that closes back at `start`.
    /// Returns true if any cycle through `v` was found.
    fn run(&mut self, v: NodeIndex, start: NodeIndex) -> bool {
        let mut closed = false;
        self.path.push(v);
        self.blocked.insert(v);

        for w in self.successors(v) {
            if w == start {
                self.found.push(self.path.clone());
                closed = true;
            } else if !self.blocked.contains(&w) && self.run(w, start) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for w in self.successors(v) {
                self.unblock_on.entry(w).or_default().insert(v);
            }
        }

        self.path.pop();
        closed
    }

    /// Out-neighbors of `v` within the current SCC, sorted and deduplicated
    /// for deterministic traversal. Self-loops are excluded; they were
    /// already reported as one-element cycles.
    fn successors(&self, v: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .neighbors(v)
            .filter(|w| *w != v && self.members.contains(w))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Unblock `v` and, transitively, everything waiting on it.
    fn unblock(&mut self, v: NodeIndex) {
        let mut stack = vec![v];
        while let Some(u) = stack.pop() {
            if self.blocked.remove(&u) {
                if let Some(waiting) = self.unblock_on.remove(&u) {
                    stack.extend(waiting);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(node_count: usize, edges: &[(usize, usize)]) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..node_count).map(|n| graph.add_node(n)).collect();
        for &(a, b) in edges {
            graph.add_edge(nodes[a], nodes[b], ());
        }
        graph
    }

    fn as_labels(graph: &DiGraph<usize, ()>, cycles: &[Vec<NodeIndex>]) -> Vec<Vec<usize>> {
        cycles
            .iter()
            .map(|cycle| cycle.iter().map(|&idx| graph[idx]).collect())
            .collect()
    }

    #[test]
    fn enumeration_cases() {
        let cases: Vec<(usize, Vec<(usize, usize)>, usize, &str)> = vec![
            (0, vec![], 0, "empty graph"),
            (2, vec![(0, 1)], 0, "single edge"),
            (4, vec![(0, 1), (0, 2), (1, 3), (2, 3)], 0, "diamond dag"),
            (1, vec![(0, 0)], 1, "self loop"),
            (2, vec![(0, 1), (1, 0)], 1, "two-cycle"),
            (3, vec![(0, 1), (1, 2), (2, 0)], 1, "three-cycle"),
            (
                4,
                vec![(0, 1), (1, 0), (2, 3), (3, 2)],
                2,
                "disjoint two-cycles",
            ),
            (
                3,
                vec![(0, 1), (1, 0), (1, 2), (2, 1)],
                2,
                "figure-8 sharing a node",
            ),
            (
                3,
                vec![(0, 1), (1, 0), (1, 2), (2, 0)],
                2,
                "overlapping cycles",
            ),
            (
                3,
                vec![(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)],
                5,
                "complete digraph on three nodes",
            ),
            (
                5,
                vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
                1,
                "five-cycle",
            ),
        ];

        for (nodes, edges, expected, desc) in cases {
            let graph = graph_of(nodes, &edges);
            let cycles = simple_cycles(&graph);
            assert_eq!(cycles.len(), expected, "case: {desc}");
        }
    }

    #[test]
    fn cycle_contents_follow_edge_direction() {
        let graph = graph_of(3, &[(0, 1), (1, 2), (2, 0)]);
        let cycles = as_labels(&graph, &simple_cycles(&graph));
        assert_eq!(cycles, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn each_cycle_reported_once_up_to_rotation() {
        // Two rotations of the same 3-cycle must not both appear.
        let graph = graph_of(3, &[(0, 1), (1, 2), (2, 0)]);
        let cycles = simple_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0][0], cycles[0].iter().copied().min().expect("nonempty"));
    }

    #[test]
    fn self_loop_beside_longer_cycle() {
        let graph = graph_of(2, &[(0, 0), (0, 1), (1, 0)]);
        let mut cycles = as_labels(&graph, &simple_cycles(&graph));
        cycles.sort();
        assert_eq!(cycles, vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn nested_cycles_all_found() {
        // 0→1→2→3→0 with chord 1→0 and 2→0: three cycles total.
        let graph = graph_of(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (1, 0), (2, 0)]);
        let mut cycles = as_labels(&graph, &simple_cycles(&graph));
        cycles.sort();
        assert_eq!(
            cycles,
            vec![vec![0, 1], vec![0, 1, 2], vec![0, 1, 2, 3]]
        );
    }
}
