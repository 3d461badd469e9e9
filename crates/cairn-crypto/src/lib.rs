//! Content hashing for Cairn.
//!
//! An object identifier is the BLAKE3 digest of the object's canonical
//! encoding, `kind || 0x00 || payload`. [`ContentHasher`] produces that
//! digest either from an in-memory payload or by streaming a reader, so
//! large files can be identified without buffering them.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
