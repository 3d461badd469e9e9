use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use cairn_store::{Object, ObjectStore};
use cairn_types::ObjectKind;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{EntryOrder, SnapshotConfig, SymlinkPolicy};
use crate::entry::{Tree, TreeEntry};
use crate::error::{SnapshotCause, TreeError, TreeResult};

/// Recursively snapshots directories into tree objects.
///
/// Every blob and sub-tree discovered is persisted to the store before the
/// tree that references it. A failure anywhere aborts the whole snapshot:
/// no tree above the failing path is written.
pub struct TreeBuilder<'a> {
    store: &'a dyn ObjectStore,
    config: SnapshotConfig,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder with the default configuration.
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self::with_config(store, SnapshotConfig::default())
    }

    pub fn with_config(store: &'a dyn ObjectStore, config: SnapshotConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Snapshot `dir` and return its persisted root tree object.
    pub fn snapshot(&self, dir: &Path) -> TreeResult<Object> {
        let meta = fs::metadata(dir).map_err(|e| TreeError::snapshot(dir, e))?;
        if !meta.is_dir() {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "not a directory");
            return Err(TreeError::snapshot(dir, err));
        }
        self.write_tree(dir)
    }

    fn write_tree(&self, dir: &Path) -> TreeResult<Object> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.order == EntryOrder::Sorted {
            walker = walker.sort_by_file_name();
        }

        // Read the whole listing first so no directory handle stays open
        // while subtrees are built.
        let listing = walker
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                TreeError::snapshot(path, io::Error::from(e))
            })?;

        let mut entries = Vec::with_capacity(listing.len());
        for entry in &listing {
            let path = entry.path();
            if self.config.is_ignored(entry.file_name()) {
                debug!(path = %path.display(), "ignored");
                continue;
            }
            let name = entry_name(entry.file_name())
                .ok_or_else(|| TreeError::snapshot(path, SnapshotCause::InvalidName))?;

            let file_type = entry.file_type();
            let child = if file_type.is_dir() {
                self.write_tree(path)?
            } else if file_type.is_file() {
                self.write_blob(path)?
            } else if file_type.is_symlink() {
                self.write_symlink(path)?
            } else {
                warn!(path = %path.display(), "skipping special file");
                continue;
            };
            entries.push(TreeEntry::new(child.kind(), child.id(), name));
        }

        let tree = Tree::new(entries);
        let object = tree.to_object();
        self.store
            .put(&object)
            .map_err(|e| TreeError::snapshot(dir, e))?;
        debug!(path = %dir.display(), id = %object.id(), entries = tree.len(), "tree written");
        Ok(object)
    }

    fn write_blob(&self, path: &Path) -> TreeResult<Object> {
        let file = File::open(path).map_err(|e| TreeError::snapshot(path, e))?;
        let object = Object::new(ObjectKind::Blob, file).map_err(|e| TreeError::snapshot(path, e))?;
        self.store
            .put(&object)
            .map_err(|e| TreeError::snapshot(path, e))?;
        Ok(object)
    }

    fn write_symlink(&self, path: &Path) -> TreeResult<Object> {
        if self.config.symlinks == SymlinkPolicy::Reject {
            return Err(TreeError::snapshot(path, SnapshotCause::SymlinkRejected));
        }
        let target = fs::read_link(path).map_err(|e| TreeError::snapshot(path, e))?;
        let object = Object::blob(os_bytes(target.as_os_str()));
        self.store
            .put(&object)
            .map_err(|e| TreeError::snapshot(path, e))?;
        Ok(object)
    }
}

/// A basename usable in a tree line.
fn entry_name(name: &OsStr) -> Option<&str> {
    name.to_str().filter(|s| !s.contains('\n'))
}

#[cfg(unix)]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}
