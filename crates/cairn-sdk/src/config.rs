use std::fs;
use std::io;
use std::path::Path;

use cairn_tree::{SnapshotConfig, METADATA_DIR};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// File name of the repository configuration inside `.cairn`.
pub const CONFIG_FILE: &str = "config.toml";

/// Repository configuration, stored as `.cairn/config.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Settings for `write-tree`.
    pub snapshot: SnapshotConfig,
}

impl RepoConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SdkError::io(path)(e)),
        };
        toml::from_str(&text).map_err(|e| SdkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write to `path`.
    pub fn save(&self, path: &Path) -> SdkResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| SdkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, text).map_err(SdkError::io(path))
    }

    /// Snapshot settings with the metadata directory always ignored.
    pub fn effective_snapshot(&self) -> SnapshotConfig {
        let mut snapshot = self.snapshot.clone();
        if !snapshot.ignore.iter().any(|name| name == METADATA_DIR) {
            snapshot.ignore.push(METADATA_DIR.to_string());
        }
        snapshot
    }
}
