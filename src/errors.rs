use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a raw remote string into a [`crate::RemoteRef`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("url is missing a host: {0:?}")]
    MissingHost(String),
}

/// Failure to resolve the clone root (`GETPATH`).
#[derive(Debug, Error)]
pub enum PathError {
    /// Relative roots are rejected instead of being resolved against the
    /// current working directory.
    #[error("GETPATH is not an absolute path: {0:?}")]
    NotAbsolute(String),
    #[error("could not determine home directory")]
    HomeNotFound,
    #[error("failed to create GETPATH directory {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while ensuring a repository exists at its target directory.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("git repository not found: {0}")]
    RemoteNotFound(String),
    /// The target exists on disk but is not an initialized repository.
    #[error("{} exists but {} does not", .dir.display(), .gitdir.display())]
    Obstructed { dir: PathBuf, gitdir: PathBuf },
    #[error("failed to create {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("git clone failed: {0}")]
    CloneFailed(String),
}
