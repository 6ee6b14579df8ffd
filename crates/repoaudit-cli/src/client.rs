//! Blocking REST client for fetching repository metadata.
//!
//! Two calls per instance: the repository list, then a detail lookup per
//! repository (the list endpoint omits remote URLs and virtual include
//! lists). Failures degrade instead of aborting: a failed detail fetch
//! falls back to the summary record, a failed instance yields an empty
//! snapshot, and the audit proceeds with whatever was fetched.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{error, info, warn};

use repoaudit_core::{InstanceSnapshot, RepoRecord};

use crate::config::InstanceConfig;

/// One entry of the repository list endpoint.
#[derive(Debug, Deserialize)]
struct RepoSummary {
    key: String,
    #[serde(flatten)]
    record: RepoRecord,
}

/// Blocking metadata client over all configured instances.
pub struct MetadataClient {
    agent: ureq::Agent,
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataClient {
    #[must_use]
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent("repoaudit")
            .build();
        Self { agent }
    }

    /// Fetch snapshots for every configured instance.
    ///
    /// An instance whose list endpoint fails contributes an empty snapshot
    /// (logged at `error!`); one unreachable deployment never aborts the
    /// audit of the others.
    #[must_use]
    pub fn fetch_all(&self, configs: &[InstanceConfig]) -> Vec<InstanceSnapshot> {
        configs
            .iter()
            .map(|config| match self.fetch_instance(config) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    error!(instance = %config.name, %err, "failed to fetch repositories");
                    InstanceSnapshot::new(&config.name, &config.url)
                }
            })
            .collect()
    }

    /// Fetch one instance's repositories, detail records included.
    pub fn fetch_instance(&self, config: &InstanceConfig) -> Result<InstanceSnapshot> {
        let base = config.url.trim_end_matches('/');
        let list_url = format!("{base}/api/repositories");

        let summaries: Vec<RepoSummary> = self
            .get_json(&list_url)
            .with_context(|| format!("listing repositories on {}", config.name))?;

        let mut repositories: BTreeMap<String, RepoRecord> = BTreeMap::new();
        for summary in summaries {
            let detail_url = format!("{base}/api/repositories/{}", summary.key);
            let record = match self.get_json::<RepoRecord>(&detail_url) {
                Ok(detail) => detail,
                Err(err) => {
                    warn!(
                        instance = %config.name,
                        repo = %summary.key,
                        %err,
                        "falling back to summary record"
                    );
                    summary.record
                }
            };
            repositories.insert(summary.key, record);
        }

        info!(
            instance = %config.name,
            count = repositories.len(),
            "fetched repositories"
        );

        let mut snapshot = InstanceSnapshot::new(&config.name, &config.url);
        snapshot.repositories = repositories;
        Ok(snapshot)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| anyhow::anyhow!("request failed for {url}: {err}"))?;
        response
            .into_json::<T>()
            .with_context(|| format!("failed to decode JSON response from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoaudit_core::RepoType;

    #[test]
    fn summary_entry_deserializes_with_flattened_record() {
        let raw = r#"{"key": "libs-release", "type": "LOCAL", "packageType": "maven"}"#;
        let summary: RepoSummary = serde_json::from_str(raw).expect("summary");
        assert_eq!(summary.key, "libs-release");
        assert_eq!(summary.record.repo_type, RepoType::Local);
        assert_eq!(summary.record.package_type, "maven");
    }

    #[test]
    fn summary_entry_tolerates_minimal_shape() {
        let summary: RepoSummary =
            serde_json::from_str(r#"{"key": "x"}"#).expect("minimal summary");
        assert_eq!(summary.record.repo_type, RepoType::Unknown);
    }
}
