//! Content-addressed object storage for Cairn.
//!
//! Every object is stored under its BLAKE3 identifier in its canonical
//! encoding, `kind || 0x00 || payload`, analogous to git's loose objects.
//!
//! # Object Kinds
//!
//! - `blob` -- raw content (file contents, symlink targets)
//! - `tree` -- directory listing, one `<kind> <id> <name>` line per entry
//! - `commit`, `tag` -- recognized tags, never constructed here
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- sharded files under `.cairn/objects/<id[0:2]>/<id>`
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes land in a temporary file and are renamed into place.
//! 3. Reads return the requested identifier; verification is explicit.
//! 4. All I/O errors are propagated with the offending path attached.

pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{CodecError, StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{decode, encode, Object};
pub use traits::ObjectStore;
