//! Streaming download and staged-file handling.
//!
//! This crate provides:
//! - `fetch_to_staging`: stream a remote video into local transient storage
//! - `StagedFile`: the per-request handle to the staged copy, with
//!   best-effort cleanup

pub mod error;
pub mod staging;

pub use error::{MediaError, MediaResult};
pub use staging::{fetch_to_staging, StagedFile};
