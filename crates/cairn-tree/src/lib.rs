//! Directory snapshots for Cairn.
//!
//! [`TreeBuilder`] walks a directory and writes one blob per regular file
//! and one tree per directory to an [`ObjectStore`](cairn_store::ObjectStore),
//! bottom-up, returning the root tree. A tree payload is a sequence of
//! `<kind> <id> <name>\n` lines; [`Tree`] encodes and parses it.
//!
//! Snapshots are reproducible by default: entries are sorted by name,
//! symbolic links are stored as their target path instead of being
//! followed, and the metadata directory is never included.

pub mod builder;
pub mod config;
pub mod entry;
pub mod error;

pub use builder::TreeBuilder;
pub use config::{EntryOrder, SnapshotConfig, SymlinkPolicy, METADATA_DIR};
pub use entry::{Tree, TreeEntry};
pub use error::{SnapshotCause, TreeError, TreeResult};
