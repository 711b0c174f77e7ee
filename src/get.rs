use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::CloneError;
use crate::git::{Git2Client, GitClient};
use crate::progress::{ok_style, spinner_style};
use crate::remote::RemoteRef;
use crate::root::{RootSources, resolve_root};

/// Metadata directory marking an initialized repository.
const GIT_DIR: &str = ".git";

/// What [`ensure_cloned`] did to satisfy the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The repository was cloned into the target directory.
    Cloned,
    /// The target already held an initialized repository; nothing was done.
    Existing,
}

/// Make sure the repository behind `reference` exists at `target`.
///
/// Steps, in order:
/// 1. Check the remote is reachable — before any filesystem mutation, so a
///    bad remote never leaves a partial directory behind.
/// 2. If `target/.git` exists, succeed without touching anything.
/// 3. If `target` exists without `.git`, refuse: the tool never clones into
///    a non-repository directory.
/// 4. Create the parent chain and clone.
///
/// # Errors
/// - [`CloneError::RemoteNotFound`] if the remote is unreachable or not a
///   repository.
/// - [`CloneError::Obstructed`] if the target exists but holds no
///   repository metadata.
/// - [`CloneError::CreateDir`] / [`CloneError::CloneFailed`] for filesystem
///   and transport failures; the transport's diagnostic is preserved.
pub fn ensure_cloned<G: GitClient>(
    git: &G,
    reference: &RemoteRef,
    target: &Path,
) -> Result<CloneOutcome, CloneError> {
    let url = reference.url();
    git.check_remote(&url)
        .map_err(|_| CloneError::RemoteNotFound(url.clone()))?;

    let gitdir = target.join(GIT_DIR);
    if gitdir.exists() {
        return Ok(CloneOutcome::Existing);
    }
    if target.exists() {
        return Err(CloneError::Obstructed {
            dir: target.to_path_buf(),
            gitdir,
        });
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| CloneError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    git.clone_into(&url, target)
        .map_err(|e| CloneError::CloneFailed(format!("{e:#}")))?;
    Ok(CloneOutcome::Cloned)
}

/// Resolve `remote` to its target directory under the clone root and make
/// sure the repository is present there.
///
/// Progress is shown on stderr with a spinner; the returned path is the
/// caller's to print.
pub fn cmd_get(remote: &str) -> Result<PathBuf> {
    let reference = RemoteRef::parse(remote)
        .with_context(|| format!("unable to parse repository url: {:?}", remote))?;
    let root = resolve_root(&RootSources::from_process())?;
    let target = root.join(reference.directory());
    let url = reference.url();

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("cloning {}", url));

    match ensure_cloned(&Git2Client, &reference, &target) {
        Ok(CloneOutcome::Cloned) => {
            pb.set_style(ok_style());
            pb.finish_with_message(format!("cloned {}", url));
        }
        Ok(CloneOutcome::Existing) => {
            pb.set_style(ok_style());
            pb.finish_with_message(format!("already cloned {}", url));
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    }

    Ok(target)
}
