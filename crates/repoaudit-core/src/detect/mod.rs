//! Issue detectors over the built repository graph.
//!
//! Seven independent analyses plus the remote-to-virtual direct-edge check,
//! all pure functions over `&RepoGraph`: no I/O, no mutation, no errors.
//! A graph with nothing to report yields empty lists, never failures,
//! including empty, self-looping, and fully disconnected graphs.
//!
//! The path-enumeration detectors ([`remote_chains`] and
//! [`long_dependency_chains`]) are exponential in the worst case. The
//! cutoffs in [`DetectorConfig`] are the only internal bounds; callers that
//! audit dense graphs should wrap the sweep in an external timeout and are
//! free to skip those two analyses entirely.

pub mod chains;
pub mod cycles;
pub mod isolation;
pub mod remote_virtual;
pub mod shadowing;

pub use chains::{long_dependency_chains, remote_chains};
pub use cycles::{cross_instance_loops, include_cycles, simple_cycles};
pub use isolation::isolated_repositories;
pub use remote_virtual::remote_to_virtual;
pub use shadowing::shadowed_repositories;

/// Tunables for the path-enumeration detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Maximum hops explored per remote forwarding chain.
    pub remote_chain_hops: usize,
    /// A dependency chain is "long" when it visits more than this many nodes.
    pub max_chain_len: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            remote_chain_hops: 10,
            max_chain_len: 5,
        }
    }
}
