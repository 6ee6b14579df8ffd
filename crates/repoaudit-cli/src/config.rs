//! Audit configuration: which manager instances to fetch from.
//!
//! Loaded from YAML or JSON, chosen by file extension. Validation collects
//! every problem instead of stopping at the first, so an operator can fix a
//! config in one pass.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One configured manager instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Stable instance name; becomes the instance half of every node id.
    pub name: String,
    /// Base URL of the instance API, e.g. `https://art.example.com/artifactory`.
    pub url: String,
}

/// Top-level config file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Accepts the legacy `artifactory_instances` key as an alias.
    #[serde(alias = "artifactory_instances")]
    pub instances: Vec<InstanceConfig>,
}

impl AuditConfig {
    /// Load a config file, dispatching on extension (`.yaml`/`.yml`/`.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse YAML config {}", path.display())),
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse JSON config {}", path.display())),
            _ => bail!(
                "unsupported config file format: {} (expected .yaml, .yml, or .json)",
                path.display()
            ),
        }
    }

    /// Validate the config, returning every problem found.
    ///
    /// An empty result means the config is usable for an audit.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.instances.is_empty() {
            problems.push("no instances configured".to_string());
            return problems;
        }

        let mut seen_names: HashSet<&str> = HashSet::new();
        for (i, instance) in self.instances.iter().enumerate() {
            let ordinal = i + 1;
            if instance.name.is_empty() {
                problems.push(format!("instance #{ordinal} is missing a name"));
            } else if !seen_names.insert(&instance.name) {
                problems.push(format!(
                    "instance #{ordinal} reuses the name {:?}",
                    instance.name
                ));
            }
            if instance.url.is_empty() {
                problems.push(format!(
                    "instance #{ordinal} ({}) is missing a url",
                    if instance.name.is_empty() {
                        "unnamed"
                    } else {
                        &instance.name
                    }
                ));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_of(entries: &[(&str, &str)]) -> AuditConfig {
        AuditConfig {
            instances: entries
                .iter()
                .map(|(name, url)| InstanceConfig {
                    name: (*name).to_string(),
                    url: (*url).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn valid_config_has_no_problems() {
        let config = config_of(&[("a", "http://a/art"), ("b", "http://b/art")]);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn empty_instance_list_is_reported() {
        let config = AuditConfig::default();
        assert_eq!(config.validate(), vec!["no instances configured"]);
    }

    #[test]
    fn all_problems_are_collected() {
        let config = config_of(&[("", "http://a/art"), ("a", ""), ("a", "http://b/art")]);
        let problems = config.validate();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("missing a name"));
        assert!(problems[1].contains("missing a url"));
        assert!(problems[2].contains("reuses the name"));
    }

    #[test]
    fn yaml_accepts_legacy_instances_key() {
        let raw = "artifactory_instances:\n  - name: prod\n    url: http://a/art\n";
        let config: AuditConfig = serde_yaml::from_str(raw).expect("parse yaml");
        assert_eq!(config.instances.len(), 1);
        assert_eq!(config.instances[0].name, "prod");
    }
}
