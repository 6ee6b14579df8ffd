#![forbid(unsafe_code)]
//! repoaudit-core: repository relationship graph and issue detection.
//!
//! The core consumes already-fetched repository metadata
//! ([`model::InstanceSnapshot`]s), builds a typed-edge directed graph
//! ([`graph::RepoGraph`]), and runs a battery of structural analyses over
//! it ([`detect`], aggregated by [`report::AuditReport`]). It performs no
//! network, file, or terminal I/O; fetching and presentation belong to the
//! CLI crate.
//!
//! # Conventions
//!
//! - **Errors**: the core API is infallible. Malformed records
//!   degrade to `unknown` attributes, unresolved relationships are omitted,
//!   and detectors return empty lists rather than failing.
//! - **Logging**: `tracing` macros; the builder logs at `info!`/`debug!`,
//!   detectors stay quiet.
//! - **Mutation**: a [`graph::RepoGraph`] is immutable once built; every
//!   detector takes it by shared reference.

pub mod detect;
pub mod graph;
pub mod model;
pub mod report;
pub mod resolve;

pub use detect::DetectorConfig;
pub use graph::RepoGraph;
pub use model::{EdgeKind, InstanceSnapshot, RepoId, RepoRecord, RepoType};
pub use report::AuditReport;
pub use resolve::{PrefixResolver, ResolveTarget};
