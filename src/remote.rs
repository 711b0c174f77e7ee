use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

use crate::errors::ParseError;

/// Scheme assumed when a remote is given without one (`host/path`).
pub const DEFAULT_SCHEME: &str = "https";

/// SCP-like syntax, e.g. `git@github.com:user/repo.git`. Matched before
/// generic URL parsing because the colon-without-scheme form is not valid
/// URL syntax.
static SCP_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)@([\w.-]+):(.*)$").unwrap());

/// A parsed remote reference.
///
/// `scheme` is always populated (defaulted to [`DEFAULT_SCHEME`] when the
/// input has none) and `host` is never empty. `path` is kept as written,
/// possibly with redundant separators or a `.git` suffix; cleanup happens
/// in [`RemoteRef::directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub scheme: String,
    pub user: Option<String>,
    pub host: String,
    pub path: String,
}

impl RemoteRef {
    /// Parse a raw remote string.
    ///
    /// Tries the SCP-like form first and converts it to an `ssh` reference,
    /// e.g. `git@github.com:user/repo` becomes `ssh://git@github.com/user/repo`.
    /// Everything else is parsed as a generic URL; scheme-less input is
    /// retried with `https://` prefixed.
    ///
    /// # Errors
    /// Returns [`ParseError`] if the string is not valid URL syntax or
    /// names no host.
    pub fn parse(remote: &str) -> Result<Self, ParseError> {
        if let Some(m) = SCP_SYNTAX.captures(remote) {
            return Ok(RemoteRef {
                scheme: "ssh".to_string(),
                user: Some(m[1].to_string()),
                host: m[2].to_string(),
                path: m[3].to_string(),
            });
        }

        let url = match Url::parse(remote) {
            Ok(u) => u,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("{DEFAULT_SCHEME}://{remote}"))?
            }
            Err(e) => return Err(e.into()),
        };

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ParseError::MissingHost(remote.to_string()))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host,
        };

        Ok(RemoteRef {
            scheme: url.scheme().to_string(),
            user: (!url.username().is_empty()).then(|| url.username().to_string()),
            host,
            path: url.path().to_string(),
        })
    }

    /// Render the canonical url form, `scheme://[user@]host/path`.
    ///
    /// This is the string handed to the git client and shown in messages.
    pub fn url(&self) -> String {
        let sep = if self.path.starts_with('/') { "" } else { "/" };
        match &self.user {
            Some(user) => format!("{}://{}@{}{}{}", self.scheme, user, self.host, sep, self.path),
            None => format!("{}://{}{}{}", self.scheme, self.host, sep, self.path),
        }
    }

    /// Map the reference to its relative on-disk directory,
    /// `<host>/<path-without-.git>`.
    ///
    /// Empty and `.` segments are dropped, `..` pops the previous segment,
    /// and exactly one trailing `.git` is stripped, so `host///a/repo.git`
    /// and `host/a/repo` map to the same directory.
    pub fn directory(&self) -> PathBuf {
        let joined = format!("{}/{}", self.host, self.path);
        let trimmed = joined.strip_suffix(".git").unwrap_or(&joined);

        let mut segments: Vec<&str> = Vec::new();
        for seg in trimmed.split('/') {
            match seg {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
        segments.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parse_keeps_explicit_git_scheme() {
        let r = RemoteRef::parse("git://github.com/arbourd/git-get.git").unwrap();
        assert_eq!(r.scheme, "git");
        assert_eq!(r.host, "github.com");
        assert_eq!(r.url(), "git://github.com/arbourd/git-get.git");
    }

    #[test]
    fn parse_keeps_explicit_https_scheme() {
        let r = RemoteRef::parse("https://github.com/arbourd/git-get.git").unwrap();
        assert_eq!(r.scheme, "https");
        assert_eq!(r.user, None);
        assert_eq!(r.url(), "https://github.com/arbourd/git-get.git");
    }

    #[test]
    fn parse_converts_scp_syntax_to_ssh() {
        let r = RemoteRef::parse("git@github.com:arbourd/git-get.git").unwrap();
        assert_eq!(r.scheme, "ssh");
        assert_eq!(r.user.as_deref(), Some("git"));
        assert_eq!(r.host, "github.com");
        assert_eq!(r.path, "arbourd/git-get.git");
        assert_eq!(r.url(), "ssh://git@github.com/arbourd/git-get.git");
    }

    #[test]
    fn parse_defaults_to_https_without_scheme() {
        let r = RemoteRef::parse("github.com/arbourd/git-get").unwrap();
        assert_eq!(r.scheme, "https");
        assert_eq!(r.url(), "https://github.com/arbourd/git-get");
    }

    #[test]
    fn parse_keeps_explicit_ssh_url() {
        let r = RemoteRef::parse("ssh://git@github.com/arbourd/git-get.git").unwrap();
        assert_eq!(r.scheme, "ssh");
        assert_eq!(r.user.as_deref(), Some("git"));
        assert_eq!(r.url(), "ssh://git@github.com/arbourd/git-get.git");
    }

    #[test]
    fn parse_keeps_port_in_host() {
        let r = RemoteRef::parse("https://git.example.com:8443/team/repo").unwrap();
        assert_eq!(r.host, "git.example.com:8443");
        assert_eq!(r.url(), "https://git.example.com:8443/team/repo");
    }

    #[test]
    fn parse_rejects_url_without_host() {
        assert!(RemoteRef::parse("mailto:dev@example.com").is_err());
        assert!(RemoteRef::parse("https://").is_err());
    }

    #[test]
    fn directory_joins_host_and_path() {
        let r = RemoteRef::parse("https://github.com/arbourd/git-get").unwrap();
        assert_eq!(r.directory(), Path::new("github.com/arbourd/git-get"));
    }

    #[test]
    fn directory_collapses_repeated_separators() {
        let r = RemoteRef {
            scheme: "https".to_string(),
            user: None,
            host: "github.com".to_string(),
            path: "arbourd///git-get".to_string(),
        };
        assert_eq!(r.directory(), Path::new("github.com/arbourd/git-get"));
    }

    #[test]
    fn directory_strips_exactly_one_git_suffix() {
        let r = RemoteRef::parse("https://github.com/arbourd/git-get.git").unwrap();
        assert_eq!(r.directory(), Path::new("github.com/arbourd/git-get"));

        let twice = RemoteRef {
            scheme: "https".to_string(),
            user: None,
            host: "github.com".to_string(),
            path: "arbourd/odd.git.git".to_string(),
        };
        assert_eq!(twice.directory(), Path::new("github.com/arbourd/odd.git"));
    }

    #[test]
    fn directory_keeps_subgroup_depth() {
        let r = RemoteRef::parse("https://gitlab.com/gitlab-org/dev-subdepartment/plugin").unwrap();
        assert_eq!(
            r.directory(),
            Path::new("gitlab.com/gitlab-org/dev-subdepartment/plugin")
        );
    }

    #[test]
    fn directory_drops_dot_and_dotdot_segments() {
        let r = RemoteRef {
            scheme: "https".to_string(),
            user: None,
            host: "github.com".to_string(),
            path: "arbourd/./../other/repo".to_string(),
        };
        assert_eq!(r.directory(), Path::new("github.com/other/repo"));
    }

    #[test]
    fn directory_ignores_scp_leading_slash_difference() {
        let scp = RemoteRef::parse("git@github.com:arbourd/git-get.git").unwrap();
        let https = RemoteRef::parse("https://github.com/arbourd/git-get.git").unwrap();
        assert_eq!(scp.directory(), https.directory());
    }
}
