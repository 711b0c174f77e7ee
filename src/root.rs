use colored::Colorize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::PathError;

/// Default clone root when nothing is configured.
pub const DEFAULT_ROOT: &str = "~/src";

/// Key used to store the clone root in the global git config.
pub const GIT_CONFIG_KEY: &str = "get.path";

/// Environment variable holding the clone root.
pub const ENV_KEY: &str = "GETPATH";

/// Deprecated spelling of [`ENV_KEY`], still honored with a warning.
pub const ENV_KEY_DEPRECATED: &str = "GITGETPATH";

/// Snapshot of the configuration inputs the clone root is resolved from.
///
/// Gathered once per invocation with [`RootSources::from_process`]; tests
/// construct it directly so resolution never depends on process state.
#[derive(Debug, Clone, Default)]
pub struct RootSources {
    pub git_config: Option<String>,
    pub env: Option<String>,
    pub env_deprecated: Option<String>,
    pub home: Option<PathBuf>,
}

impl RootSources {
    /// Read the sources from the running process: the `get.path` entry of
    /// the global git config, both environment variables, and the user's
    /// home directory. A missing or unreadable git config is treated as
    /// "no entry".
    pub fn from_process() -> Self {
        let git_config = git2::Config::open_default()
            .and_then(|config| config.get_string(GIT_CONFIG_KEY))
            .ok();
        RootSources {
            git_config,
            env: env::var(ENV_KEY).ok(),
            env_deprecated: env::var(ENV_KEY_DEPRECATED).ok(),
            home: dirs::home_dir(),
        }
    }

    /// Pick the raw root: first non-empty source wins, in the order
    /// git config, environment, deprecated environment alias, default.
    /// The second field is true when the deprecated alias was used.
    fn raw(&self) -> (&str, bool) {
        if let Some(p) = non_empty(&self.git_config) {
            return (p, false);
        }
        if let Some(p) = non_empty(&self.env) {
            return (p, false);
        }
        if let Some(p) = non_empty(&self.env_deprecated) {
            return (p, true);
        }
        (DEFAULT_ROOT, false)
    }
}

fn non_empty(src: &Option<String>) -> Option<&str> {
    src.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the absolute clone root and make sure it exists on disk.
///
/// A leading `~` is expanded to the home directory from `sources`. The
/// result must be absolute; relative roots are rejected so repository
/// placement never depends on the current working directory. The directory
/// (and any missing parents) is created if needed, so a second call with
/// unchanged sources is a no-op.
///
/// # Errors
/// - [`PathError::HomeNotFound`] if expansion is needed but no home
///   directory is known.
/// - [`PathError::NotAbsolute`] if the expanded path is relative.
/// - [`PathError::Create`] if the directory cannot be created.
pub fn resolve_root(sources: &RootSources) -> Result<PathBuf, PathError> {
    let (raw, deprecated) = sources.raw();
    if deprecated {
        eprintln!(
            "{}: {} is deprecated; set {} instead",
            "warning".yellow().bold(),
            ENV_KEY_DEPRECATED,
            ENV_KEY
        );
    }

    let path = expand_home(raw, sources.home.as_deref())?;
    if !path.is_absolute() {
        return Err(PathError::NotAbsolute(path.display().to_string()));
    }

    if !path.exists() {
        fs::create_dir_all(&path).map_err(|source| PathError::Create {
            path: path.clone(),
            source,
        })?;
    }

    Ok(path)
}

/// Expand a leading `~` to the home directory. Everything else passes
/// through unchanged.
fn expand_home(raw: &str, home: Option<&Path>) -> Result<PathBuf, PathError> {
    match raw.strip_prefix('~') {
        Some(rest) => {
            let home = home.ok_or(PathError::HomeNotFound)?;
            Ok(home.join(rest.trim_start_matches('/')))
        }
        None => Ok(PathBuf::from(raw)),
    }
}
