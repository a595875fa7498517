//! Repository detection from remote URLs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// scp-like syntax: `git@host:owner/repo.git`
static SCP_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<host>[^:/]+):(?P<path>[^/].*)$").expect("valid regex")
});

const GITHUB_HOST: &str = "github.com";

/// Hosts that are known not to be GitHub
const FOREIGN_HOSTS: [&str; 3] = ["gitlab.com", "bitbucket.org", "codeberg.org"];

/// Extract owner/repo (and an Enterprise host, if any) from a remote URL
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let url = url.trim();

    let (host, path) = if url.contains("://") {
        let parsed =
            Url::parse(url).map_err(|e| Error::UnsupportedRemote(format!("{url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::UnsupportedRemote(format!("{url}: no host")))?
            .to_string();
        (host, parsed.path().to_string())
    } else if let Some(caps) = SCP_REMOTE.captures(url) {
        (caps["host"].to_string(), caps["path"].to_string())
    } else {
        return Err(Error::UnsupportedRemote(url.to_string()));
    };

    if FOREIGN_HOSTS.contains(&host.as_str()) {
        return Err(Error::UnsupportedRemote(format!("{url}: {host} is not GitHub")));
    }

    let mut segments = path
        .trim_matches('/')
        .trim_end_matches(".git")
        .split('/')
        .filter(|s| !s.is_empty());

    let (Some(owner), Some(repo), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(Error::UnsupportedRemote(format!(
            "{url}: expected <owner>/<repo>"
        )));
    };

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: (host != GITHUB_HOST).then_some(host),
    })
}
