use std::fmt;

use cairn_store::Object;
use cairn_types::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// A single entry in a tree object: one `<kind> <id> <name>\n` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Kind of the referenced object (blob or tree).
    pub kind: ObjectKind,
    /// Content-addressed ID of the referenced object.
    pub id: ObjectId,
    /// Basename of the entry.
    pub name: String,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(kind: ObjectKind, id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
        }
    }

    fn parse(line: &str, lineno: usize) -> TreeResult<Self> {
        let malformed = |reason: String| TreeError::MalformedEntry {
            line: lineno,
            reason,
        };
        let mut fields = line.splitn(3, ' ');
        let (Some(kind), Some(id), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(format!("expected 3 fields in {line:?}")));
        };
        let kind: ObjectKind = kind.parse().map_err(|e| malformed(format!("{e}")))?;
        if !matches!(kind, ObjectKind::Blob | ObjectKind::Tree) {
            return Err(malformed(format!("{kind} cannot appear in a tree")));
        }
        let id: ObjectId = id.parse().map_err(|e| malformed(format!("{e}")))?;
        if name.is_empty() {
            return Err(malformed("empty name".into()));
        }
        Ok(Self::new(kind, id, name))
    }
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.id, self.name)
    }
}

/// Directory listing object.
///
/// Entries keep the order they were given in; the encoding of a tree is the
/// concatenation of its entry lines, so order is part of its identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a tree with the given entries, in the given order.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Canonical payload: one `<kind> <id> <name>\n` line per entry.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out.into_bytes()
    }

    /// The tree object for this listing.
    pub fn to_object(&self) -> Object {
        Object::from_payload(ObjectKind::Tree, self.encode())
    }

    /// Parse a tree payload.
    pub fn parse(payload: &[u8]) -> TreeResult<Self> {
        let text = std::str::from_utf8(payload).map_err(|e| TreeError::MalformedEntry {
            line: 1 + payload[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count(),
            reason: "not valid UTF-8".into(),
        })?;
        if !text.is_empty() && !text.ends_with('\n') {
            return Err(TreeError::MalformedEntry {
                line: text.lines().count(),
                reason: "missing trailing newline".into(),
            });
        }
        let entries = text
            .split_terminator('\n')
            .enumerate()
            .map(|(i, line)| TreeEntry::parse(line, i + 1))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Decode a stored tree object.
    pub fn from_object(object: &Object) -> TreeResult<Self> {
        if object.kind() != ObjectKind::Tree {
            return Err(TreeError::NotATree {
                id: object.id(),
                kind: object.kind(),
            });
        }
        Self::parse(object.payload())
    }

    /// Entries in payload order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    #[test]
    fn encode_line_format() {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectKind::Blob, id(1), "a.txt"),
            TreeEntry::new(ObjectKind::Tree, id(2), "sub"),
        ]);
        let expected = format!("blob {} a.txt\ntree {} sub\n", id(1), id(2));
        assert_eq!(tree.encode(), expected.into_bytes());
    }

    #[test]
    fn encode_keeps_given_order() {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectKind::Blob, id(1), "zebra"),
            TreeEntry::new(ObjectKind::Blob, id(2), "alpha"),
        ]);
        assert_eq!(tree.entries()[0].name, "zebra");
        let reversed = Tree::new(tree.entries().iter().rev().cloned().collect());
        assert_ne!(tree.to_object().id(), reversed.to_object().id());
    }

    #[test]
    fn empty_tree_has_empty_payload() {
        let tree = Tree::default();
        assert!(tree.is_empty());
        assert!(tree.encode().is_empty());
        assert_eq!(tree.to_object().encode(), b"tree\0");
    }

    #[test]
    fn parse_inverts_encode() {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectKind::Blob, id(3), "with space.txt"),
            TreeEntry::new(ObjectKind::Tree, id(4), "nested"),
        ]);
        let parsed = Tree::parse(&tree.encode()).unwrap();
        assert_eq!(parsed, tree);
        assert_eq!(parsed.get("with space.txt").unwrap().id, id(3));
        assert!(parsed.get("missing").is_none());
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn parse_empty_payload() {
        assert!(Tree::parse(b"").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_missing_newline() {
        let payload = format!("blob {} a", id(1));
        let err = Tree::parse(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TreeError::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn parse_reports_line_number() {
        let payload = format!("blob {} a\nblob nothex b\n", id(1));
        let err = Tree::parse(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TreeError::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_commit_entries() {
        let payload = format!("commit {} head\n", id(1));
        let err = Tree::parse(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TreeError::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_short_lines() {
        let err = Tree::parse(b"blob\n").unwrap_err();
        assert!(matches!(err, TreeError::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn from_object_checks_kind() {
        let blob = Object::blob("not a tree");
        let err = Tree::from_object(&blob).unwrap_err();
        assert!(matches!(err, TreeError::NotATree { kind: ObjectKind::Blob, .. }));
    }
}
