use std::path::PathBuf;

use cairn_types::{ObjectId, ObjectKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not a cairn repository (or any parent up to /): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("object {id} is a {actual}, not a {expected}")]
    TypeMismatch {
        id: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("store error: {0}")]
    Store(#[from] cairn_store::StoreError),

    #[error("tree error: {0}")]
    Tree(#[from] cairn_tree::TreeError),
}

impl SdkError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
