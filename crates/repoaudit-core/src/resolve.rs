//! Remote-URL to repository-key resolution.
//!
//! Deciding which repository a remote's backing URL points at is inherently
//! fuzzy: the URL is free text and only by convention ends in a repository
//! key. The heuristic lives behind [`ResolveTarget`] so the graph builder
//! never depends on one particular guess and callers can swap in their own.

use tracing::trace;

use crate::model::{InstanceSnapshot, RepoId};

/// Strategy for resolving a remote repository's backing URL to a known
/// repository on one of the configured instances.
///
/// Implementations are best-effort: `None` means "not one of ours", and
/// false negatives are acceptable. A returned [`RepoId`] must name a
/// repository that actually exists in the matched instance's snapshot.
pub trait ResolveTarget {
    fn resolve(&self, url: &str, instances: &[InstanceSnapshot]) -> Option<RepoId>;
}

/// Default resolution strategy: base-URL prefix matching.
///
/// Matches the URL against every instance's base URL (longest prefix wins
/// when bases nest), strips the prefix and surrounding slashes, skips API
/// endpoint paths (`api/...`), and takes the last path segment as the
/// candidate repository key. Resolves only if that key exists among the
/// matched instance's repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixResolver;

impl ResolveTarget for PrefixResolver {
    fn resolve(&self, url: &str, instances: &[InstanceSnapshot]) -> Option<RepoId> {
        let instance = instances
            .iter()
            .filter(|inst| {
                !inst.base_url.is_empty()
                    && url.strip_prefix(&inst.base_url).is_some_and(|rest| {
                        // Require a path boundary so base `http://a/art` does
                        // not claim `http://a/artful/x`.
                        rest.is_empty() || rest.starts_with('/')
                    })
            })
            .max_by_key(|inst| inst.base_url.len())?;

        let path = url[instance.base_url.len()..].trim_matches('/');
        if path.is_empty() {
            return None;
        }
        // An `api/` path is an API endpoint, not a repository reference.
        if path == "api" || path.starts_with("api/") {
            trace!(url, "skipping api endpoint url");
            return None;
        }

        let candidate = path.rsplit('/').next()?;
        if instance.repositories.contains_key(candidate) {
            Some(RepoId::new(&instance.name, candidate))
        } else {
            trace!(url, candidate, "candidate key not present on instance");
            None
        }
    }
}
