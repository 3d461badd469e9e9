//! Foundation types for Cairn.
//!
//! Every other Cairn crate depends on `cairn-types` for the two values that
//! name stored content:
//!
//! - [`ObjectId`]: content-addressed identifier (BLAKE3 hash, 64 hex chars)
//! - [`ObjectKind`]: the tag written in front of every stored payload

pub mod error;
pub mod kind;
pub mod object;

pub use error::TypeError;
pub use kind::ObjectKind;
pub use object::ObjectId;
