use anyhow::{Context, Result};
use git2::{Cred, Direction, FetchOptions, Remote, RemoteCallbacks, build::RepoBuilder};
use std::path::Path;

use super::GitClient;

/// Build `RemoteCallbacks` with SSH-agent credentials enabled.
///
/// This allows git operations to authenticate using the user's SSH agent.
/// If no SSH key is found, it falls back to default credentials.
fn callbacks() -> RemoteCallbacks<'static> {
    let mut cb = RemoteCallbacks::new();
    cb.credentials(|_url, username_from_url, _allowed| {
        Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")).or_else(|_| Cred::default())
    });
    cb
}

fn fetch_opts_with_creds() -> FetchOptions<'static> {
    let mut fo = FetchOptions::new();
    fo.remote_callbacks(callbacks());
    fo
}

/// [`GitClient`] backed by libgit2.
pub struct Git2Client;

impl GitClient for Git2Client {
    /// Connect a detached remote in fetch direction and list its ref
    /// advertisement, the `git ls-remote` equivalent. No local state is
    /// touched.
    ///
    /// # Errors
    /// Returns an error if the remote is unreachable or does not speak the
    /// git protocol.
    fn check_remote(&self, url: &str) -> Result<()> {
        let mut remote = Remote::create_detached(url)?;
        let conn = remote
            .connect_auth(Direction::Fetch, Some(callbacks()), None)
            .with_context(|| format!("git ls-remote {}", url))?;
        conn.list()?;
        Ok(())
    }

    /// Clone `url` into `dest`.
    ///
    /// # Errors
    /// Returns an error with the transport's diagnostic if the clone fails
    /// (network error, auth failure, disk full, ...).
    fn clone_into(&self, url: &str, dest: &Path) -> Result<()> {
        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_opts_with_creds());
        builder
            .clone(url, dest)
            .with_context(|| format!("git clone {}", url))?;
        Ok(())
    }
}
