use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of a stored object.
///
/// The ASCII name of the kind is written in front of every payload, so a
/// kind tag never contains the `0x00` delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Raw content (file contents, symlink targets).
    Blob,
    /// Directory listing, one `<kind> <id> <name>` line per entry.
    Tree,
    /// Recognized tag only; no commit construction lives in Cairn.
    Commit,
    /// Recognized tag only.
    Tag,
}

impl ObjectKind {
    /// Every known kind, in tag order.
    pub const ALL: [ObjectKind; 4] = [Self::Blob, Self::Tree, Self::Commit, Self::Tag];

    /// The ASCII tag for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
            Self::Tag => "tag",
        }
    }

    /// Parse a raw tag as read from disk.
    pub fn from_tag(tag: &[u8]) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().as_bytes() == tag)
            .ok_or_else(|| TypeError::UnknownKind(String::from_utf8_lossy(tag).into_owned()))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.as_bytes())
    }
}
