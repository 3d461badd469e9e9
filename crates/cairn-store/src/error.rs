use std::path::PathBuf;

use cairn_types::ObjectId;

/// Errors from splitting canonical bytes into kind and payload.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// No `0x00` byte separates the kind tag from the payload.
    #[error("missing kind delimiter")]
    MissingDelimiter,

    /// The bytes before the delimiter are not a known kind tag.
    #[error("unknown object kind {0:?}")]
    UnknownKind(String),
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// I/O failure while reading an object file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while writing an object file or its shard directory.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes cannot be decoded into kind and payload.
    #[error("malformed object {id}: {source}")]
    MalformedObject {
        id: ObjectId,
        #[source]
        source: CodecError,
    },

    /// Content hash mismatch on a verified read (data corruption).
    #[error("hash mismatch for {id}: stored content hashes to {computed}")]
    HashMismatch { id: ObjectId, computed: ObjectId },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
