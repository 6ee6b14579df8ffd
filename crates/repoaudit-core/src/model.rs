//! Normalized repository records and identities.
//!
//! Everything in this module is plain data: the fetch layer deserializes raw
//! API responses into [`RepoRecord`]s, groups them into [`InstanceSnapshot`]s,
//! and hands them to the graph builder. No I/O happens here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Composite identity of one repository: `(instance, key)`.
///
/// Kept as two fields rather than a delimited string so instance names and
/// repository keys containing arbitrary characters can never collide.
/// [`fmt::Display`] renders the conventional `instance:key` form for humans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoId {
    pub instance: String,
    pub key: String,
}

impl RepoId {
    pub fn new(instance: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.instance, self.key)
    }
}

/// Repository class as declared by the manager.
///
/// Parsed case-insensitively; anything unrecognized (or absent) becomes
/// [`RepoType::Unknown`] rather than failing the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RepoType {
    Local,
    Remote,
    Virtual,
    #[default]
    Unknown,
}

impl RepoType {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "remote" => Self::Remote,
            "virtual" => Self::Virtual,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Virtual => "virtual",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RepoType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RepoType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Raw per-repository metadata as returned by the manager's API.
///
/// Missing fields default (`unknown` type/package, no URL, empty include
/// list) so a single malformed record never aborts ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRecord {
    /// Repository class (`local`, `remote`, `virtual`, ...).
    #[serde(rename = "type")]
    pub repo_type: RepoType,
    /// Package format served (`maven`, `npm`, ...); `unknown` when absent.
    #[serde(rename = "packageType")]
    pub package_type: String,
    /// Backing URL; only meaningful for remote repositories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Ordered include list; only meaningful for virtual repositories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
}

impl Default for RepoRecord {
    fn default() -> Self {
        Self {
            repo_type: RepoType::Unknown,
            package_type: "unknown".to_string(),
            url: None,
            repositories: Vec::new(),
        }
    }
}

impl RepoRecord {
    /// A record of the given type with all other fields defaulted.
    #[must_use]
    pub fn of_type(repo_type: RepoType) -> Self {
        Self {
            repo_type,
            ..Self::default()
        }
    }
}

/// One configured manager instance with its fetched repositories.
///
/// This is the core's entire input contract: the fetch/config layer supplies
/// a slice of snapshots and the builder does the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    /// Stable instance name; becomes the `instance` half of every [`RepoId`].
    pub name: String,
    /// Base URL of the instance, used for remote-URL target resolution.
    /// Stored without a trailing slash.
    pub base_url: String,
    /// Repository key -> raw record, for every fetched repository.
    pub repositories: BTreeMap<String, RepoRecord>,
}

impl InstanceSnapshot {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            repositories: BTreeMap::new(),
        }
    }

    /// Builder-style helper for assembling snapshots in tests and fixtures.
    #[must_use]
    pub fn with_repo(mut self, key: impl Into<String>, record: RepoRecord) -> Self {
        self.repositories.insert(key.into(), record);
        self
    }
}

/// Relationship class carried by each graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A remote repository's backing URL resolves to another known repository.
    Remote,
    /// A virtual repository aggregates another repository.
    Includes,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Includes => "includes",
        })
    }
}
