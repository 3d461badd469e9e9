use std::io;
use std::path::PathBuf;

use cairn_store::StoreError;
use cairn_types::{ObjectId, ObjectKind};

/// The underlying failure behind a [`TreeError::SnapshotFailed`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotCause {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("symbolic links are rejected by the snapshot configuration")]
    SymlinkRejected,

    #[error("entry name is not UTF-8 or contains a newline")]
    InvalidName,
}

/// Errors produced while building or reading trees.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The snapshot was aborted; `path` is where the failure happened.
    #[error("snapshot failed at {}: {source}", path.display())]
    SnapshotFailed {
        path: PathBuf,
        #[source]
        source: SnapshotCause,
    },

    /// A tree payload line could not be parsed.
    #[error("malformed tree entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },

    /// An object expected to be a tree has another kind.
    #[error("object {id} is a {kind}, not a tree")]
    NotATree { id: ObjectId, kind: ObjectKind },
}

impl TreeError {
    pub(crate) fn snapshot(path: impl Into<PathBuf>, source: impl Into<SnapshotCause>) -> Self {
        Self::SnapshotFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
