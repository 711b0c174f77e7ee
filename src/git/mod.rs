//! Git integration layer.
//!
//! This module wraps the actual backend implementation (`git2_backend`)
//! and re-exports only the stable public API: the [`GitClient`] trait and
//! the production [`Git2Client`].
//!
//! The idea is to hide internal implementation details (currently based on
//! the `git2` crate) so that future backends or alternative implementations
//! could be swapped in without affecting the rest of the codebase.

mod git2_backend;

use anyhow::Result;
use std::path::Path;

/// The two operations the clone workflow needs from a git implementation.
///
/// Both report success or failure plus a diagnostic; the workflow itself
/// never touches the transport.
pub trait GitClient {
    /// Confirm the remote is reachable and is a git repository.
    fn check_remote(&self, url: &str) -> Result<()>;

    /// Clone the remote into `dest`, which must not exist yet.
    fn clone_into(&self, url: &str, dest: &Path) -> Result<()>;
}

pub use git2_backend::Git2Client;
