//! Captured hosting-API responses stored in one JSON file.
//!
//! ```json
//! {
//!   "user": "octocat",
//!   "repos": [ { "name": "hello", "full_name": "octocat/hello",
//!                "html_url": "...", "owner": { "login": "octocat" } } ],
//!   "commits": {
//!     "hello": [ { "sha": "abc", "html_url": "...",
//!                  "commit": { "message": "init",
//!                              "committer": { "date": "2024-01-01T00:00:00Z" } } } ]
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{CommitSource, RepoSource};
use crate::domain::model::{Commit, Repository};

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Committer {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    committer: Option<Committer>,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    sha: String,
    #[serde(default)]
    html_url: Option<String>,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    repos: Vec<RepoItem>,
    #[serde(default)]
    commits: HashMap<String, Vec<CommitItem>>,
}

/// Repositories and commits read from a snapshot file.
#[derive(Debug)]
pub struct Snapshot {
    user: Option<String>,
    repos: Vec<Repository>,
    commits: HashMap<String, Vec<Commit>>,
}

impl Snapshot {
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read snapshot {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("cannot parse snapshot {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(text)?;

        let repos = file
            .repos
            .into_iter()
            .map(|r| Repository {
                full_name: r.full_name.unwrap_or_else(|| format!("{}/{}", r.owner.login, r.name)),
                name: r.name,
                owner: r.owner.login,
                html_url: r.html_url,
            })
            .collect();

        let commits = file
            .commits
            .into_iter()
            .map(|(name, items)| {
                let commits = items
                    .into_iter()
                    .map(|c| Commit {
                        sha: c.sha,
                        message: c.commit.message,
                        committed_at: c.commit.committer.and_then(|x| x.date),
                        html_url: c.html_url,
                    })
                    .collect();
                (name, commits)
            })
            .collect();

        Ok(Self {
            user: file.user,
            repos,
            commits,
        })
    }

    /// User the snapshot was captured for, if recorded.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl RepoSource for Snapshot {
    /// Repositories owned by `user` (case-insensitive); every repository when
    /// `user` is empty.
    fn repos(&self, user: &str) -> Result<Vec<Repository>> {
        let repos: Vec<_> = self
            .repos
            .iter()
            .filter(|r| user.is_empty() || r.owner.eq_ignore_ascii_case(user))
            .cloned()
            .collect();
        debug!("Snapshot has {} repos for user {:?}", repos.len(), user);
        Ok(repos)
    }
}

impl CommitSource for Snapshot {
    fn commits(&self, repo: &Repository) -> Result<Vec<Commit>> {
        Ok(self.commits.get(&repo.name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "user": "octocat",
        "repos": [
            { "name": "alpha", "full_name": "octocat/alpha",
              "html_url": "https://github.com/octocat/alpha",
              "owner": { "login": "octocat" }, "stargazers_count": 3 },
            { "name": "fork", "owner": { "login": "someone-else" } }
        ],
        "commits": {
            "alpha": [
                { "sha": "a1", "html_url": "https://github.com/octocat/alpha/commit/a1",
                  "commit": { "message": "fix bug\nmore detail",
                              "committer": { "date": "2024-01-01T00:00:00Z" } } },
                { "sha": "a0", "commit": { "message": "init", "committer": null } }
            ]
        }
    }"#;

    #[test]
    fn parses_api_shaped_json() {
        let s = Snapshot::from_json(SAMPLE).unwrap();
        assert_eq!(s.user(), Some("octocat"));

        let repos = s.repos("OctoCat").unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "octocat/alpha");

        let commits = s.commits(&repos[0]).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "fix bug\nmore detail");
        assert!(commits[0].committed_at.is_some());
        assert_eq!(commits[1].committed_at, None);
        assert_eq!(commits[1].html_url, None);
    }

    #[test]
    fn empty_user_lists_everything_and_fills_full_name() {
        let s = Snapshot::from_json(SAMPLE).unwrap();
        let repos = s.repos("").unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[1].full_name, "someone-else/fork");
        assert!(s.commits(&repos[1]).unwrap().is_empty());
    }

    #[test]
    fn open_reports_path_on_failure() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{ not json").unwrap();
        let err = Snapshot::open(f.path()).unwrap_err();
        assert!(err.to_string().contains("cannot parse snapshot"));

        let missing = Snapshot::open(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(missing.to_string().contains("cannot read snapshot"));
    }
}
