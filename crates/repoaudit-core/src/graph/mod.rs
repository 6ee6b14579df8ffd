//! Repository relationship graph.
//!
//! # Pipeline
//!
//! ```text
//! Vec<InstanceSnapshot>
//!        ↓  build::RepoGraph::build()
//! RepoGraph (petgraph DiGraph, typed edges)
//!        ↓  detect::* / report::AuditReport::detect()
//! AuditReport (findings keyed by category)
//! ```
//!
//! The graph is built fresh per analysis run and never mutated afterwards:
//! detectors take `&RepoGraph` and only read it.

pub mod build;
pub mod cycles;
pub mod paths;

pub use build::{RepoGraph, RepoNode};
pub use cycles::simple_cycles;
pub use paths::all_simple_paths_up_to;
