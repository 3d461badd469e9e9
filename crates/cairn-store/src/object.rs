use std::io::{self, Read};

use cairn_crypto::hasher::DELIMITER;
use cairn_crypto::ContentHasher;
use cairn_types::{ObjectId, ObjectKind};

use crate::error::CodecError;

/// An immutable, content-addressed object: kind tag, payload and identifier.
///
/// Objects built with [`Object::new`] or [`Object::from_payload`] carry the
/// identifier computed from their content. Objects returned by a store carry
/// the identifier they were requested under; use [`Object::compute_id`] to
/// check the two agree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    kind: ObjectKind,
    payload: Vec<u8>,
    id: ObjectId,
}

impl Object {
    /// Build an object by reading `reader` to exhaustion.
    ///
    /// Fails only when the reader does.
    pub fn new<R: Read>(kind: ObjectKind, mut reader: R) -> io::Result<Self> {
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        Ok(Self::from_payload(kind, payload))
    }

    /// Build an object from an in-memory payload.
    pub fn from_payload(kind: ObjectKind, payload: Vec<u8>) -> Self {
        let id = ContentHasher::new(kind).hash(&payload);
        Self { kind, payload, id }
    }

    /// A blob holding `data`.
    pub fn blob(data: impl Into<Vec<u8>>) -> Self {
        Self::from_payload(ObjectKind::Blob, data.into())
    }

    /// Decode canonical bytes read under `id`.
    ///
    /// The identifier is taken as given, not recomputed.
    pub fn decode(mut bytes: Vec<u8>, id: ObjectId) -> Result<Self, CodecError> {
        let (kind, _) = decode(&bytes)?;
        let payload = bytes.split_off(kind.as_str().len() + 1);
        Ok(Self { kind, payload, id })
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Recompute the identifier from kind and payload.
    pub fn compute_id(&self) -> ObjectId {
        ContentHasher::new(self.kind).hash(&self.payload)
    }

    /// Canonical on-disk bytes: `kind || 0x00 || payload`.
    pub fn encode(&self) -> Vec<u8> {
        encode(self.kind, &self.payload)
    }
}

/// Canonical on-disk bytes for `kind` and `payload`.
pub fn encode(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let tag = kind.as_str().as_bytes();
    let mut out = Vec::with_capacity(tag.len() + 1 + payload.len());
    out.extend_from_slice(tag);
    out.push(DELIMITER);
    out.extend_from_slice(payload);
    out
}

/// Split canonical bytes at the first `0x00` into kind and payload.
pub fn decode(bytes: &[u8]) -> Result<(ObjectKind, &[u8]), CodecError> {
    let split = bytes
        .iter()
        .position(|&b| b == DELIMITER)
        .ok_or(CodecError::MissingDelimiter)?;
    let kind = ObjectKind::from_tag(&bytes[..split])
        .map_err(|_| CodecError::UnknownKind(String::from_utf8_lossy(&bytes[..split]).into_owned()))?;
    Ok((kind, &bytes[split + 1..]))
}
