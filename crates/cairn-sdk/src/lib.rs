//! High-level repository API for Cairn.
//!
//! A [`Repository`] ties together a working directory, its `.cairn`
//! metadata directory, the filesystem object store inside it and the
//! repository configuration. Every operation takes its paths explicitly;
//! nothing depends on the process working directory.

pub mod config;
pub mod error;
pub mod repository;

pub use config::RepoConfig;
pub use error::{SdkError, SdkResult};
pub use repository::Repository;
