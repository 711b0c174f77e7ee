//! # git-get
//!
//! **git-get** clones git repositories into a canonical directory layout.
//!
//! A remote reference in any of the usual spellings (`https://host/path`,
//! `git://host/path`, `git@host:path`, or bare `host/path`) is resolved to
//! `$GETPATH/<host>/<path>` and cloned there if it is not present yet.
//! The resolved directory is printed on stdout, so the tool composes with
//! `cd "$(git get <remote>)"`.
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::Parser;
use git_get::cmd_get;

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "git-get",
    version,
    about = "Clones git repositories to a canonical directory under GETPATH",
    arg_required_else_help = true
)]
struct Cli {
    /// Git repository url or scp-like remote reference
    remote: String,
}

/// CLI entry point.
///
/// Parses arguments with `clap`, runs the clone workflow, and prints the
/// resolved repository directory as the sole line on stdout. Any error is
/// rendered by `anyhow` as a one-line `Error: ...` diagnostic with a
/// non-zero exit status.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cmd_get(&cli.remote)?;
    println!("{}", path.display());
    Ok(())
}
