use std::io::{self, Read};

use cairn_types::{ObjectId, ObjectKind};

/// Delimiter between the kind tag and the payload.
pub const DELIMITER: u8 = 0x00;

/// Kind-prefixed BLAKE3 content hasher.
///
/// Each hasher carries the object kind whose ASCII tag and the `0x00`
/// delimiter are fed to the digest ahead of the payload. A blob and a tree
/// with identical payload bytes therefore never share an identifier.
pub struct ContentHasher {
    kind: ObjectKind,
}

impl ContentHasher {
    /// Hasher for blob objects.
    pub const BLOB: Self = Self::new(ObjectKind::Blob);
    /// Hasher for tree objects.
    pub const TREE: Self = Self::new(ObjectKind::Tree);
    /// Hasher for commit objects.
    pub const COMMIT: Self = Self::new(ObjectKind::Commit);
    /// Hasher for tag objects.
    pub const TAG: Self = Self::new(ObjectKind::Tag);

    /// Create a hasher for the given kind.
    pub const fn new(kind: ObjectKind) -> Self {
        Self { kind }
    }

    /// The kind this hasher prefixes.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn start(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.kind.as_str().as_bytes());
        hasher.update(&[DELIMITER]);
        hasher
    }

    /// Identifier of an in-memory payload.
    pub fn hash(&self, payload: &[u8]) -> ObjectId {
        let mut hasher = self.start();
        hasher.update(payload);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }

    /// Identifier of a payload read to exhaustion from `reader`.
    ///
    /// Only fails when the reader does.
    pub fn hash_reader<R: Read>(&self, reader: R) -> io::Result<ObjectId> {
        let mut hasher = self.start();
        hasher.update_reader(reader)?;
        Ok(ObjectId::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Verify that a payload produces the expected object ID.
    pub fn verify(&self, payload: &[u8], expected: &ObjectId) -> bool {
        self.hash(payload) == *expected
    }
}
