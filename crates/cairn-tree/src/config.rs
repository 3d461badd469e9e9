use std::ffi::OsStr;

use serde::{Deserialize, Serialize};

/// Name of the repository metadata directory.
pub const METADATA_DIR: &str = ".cairn";

/// Order of entries inside a tree payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Byte order of entry names. Tree identifiers are reproducible.
    #[default]
    Sorted,
    /// Whatever order the filesystem lists entries in.
    Listing,
}

/// What to do with a symbolic link found during a snapshot.
///
/// Links are never followed, so cycles cannot occur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymlinkPolicy {
    /// Store the link target path as a blob.
    #[default]
    StoreTarget,
    /// Abort the snapshot.
    Reject,
}

/// Configuration for directory snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Entry names skipped at every depth.
    pub ignore: Vec<String>,
    /// Tree entry order.
    pub order: EntryOrder,
    /// Symbolic link handling.
    pub symlinks: SymlinkPolicy,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            ignore: vec![METADATA_DIR.to_string(), ".git".to_string()],
            order: EntryOrder::default(),
            symlinks: SymlinkPolicy::default(),
        }
    }
}

impl SnapshotConfig {
    /// Whether an entry with this basename is left out of trees.
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        self.ignore.iter().any(|ignored| OsStr::new(ignored) == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SnapshotConfig::default();
        assert_eq!(c.ignore, vec![".cairn", ".git"]);
        assert_eq!(c.order, EntryOrder::Sorted);
        assert_eq!(c.symlinks, SymlinkPolicy::StoreTarget);
    }

    #[test]
    fn ignore_matches_whole_names_only() {
        let c = SnapshotConfig::default();
        assert!(c.is_ignored(OsStr::new(".cairn")));
        assert!(c.is_ignored(OsStr::new(".git")));
        assert!(!c.is_ignored(OsStr::new(".gitignore")));
        assert!(!c.is_ignored(OsStr::new("cairn")));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: SnapshotConfig = toml::from_str("symlinks = \"reject\"").unwrap();
        assert_eq!(c.symlinks, SymlinkPolicy::Reject);
        assert_eq!(c.order, EntryOrder::Sorted);
        assert_eq!(c.ignore, SnapshotConfig::default().ignore);
    }

    #[test]
    fn toml_roundtrip() {
        let c = SnapshotConfig {
            ignore: vec!["target".into()],
            order: EntryOrder::Listing,
            symlinks: SymlinkPolicy::Reject,
        };
        let text = toml::to_string(&c).unwrap();
        assert!(text.contains("order = \"listing\""));
        let parsed: SnapshotConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, c);
    }
}
