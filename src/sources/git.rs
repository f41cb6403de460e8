use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use git2::{ErrorCode, Repository as GitRepository};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::{CommitSource, RepoSource};
use crate::domain::model::{Commit, Repository};

/// Default number of commits read per repository; matches the hosting
/// API's default page size.
pub const DEFAULT_MAX_COMMITS: usize = 30;

pub struct RepoExt(pub GitRepository);

impl RepoExt {
    pub fn open(path: &Path) -> Result<Self> {
        GitRepository::open(path)
            .with_context(|| format!("cannot open repo at {}", path.display()))
            .map(Self)
    }
    pub fn repo(&self) -> &GitRepository { &self.0 }

    /// Commits reachable from HEAD in walk order, at most `max`.
    /// An unborn HEAD has no commits; any other HEAD failure is an error.
    pub fn head_commits(&self, max: usize) -> Result<Vec<Commit>> {
        let repo = self.repo();
        match repo.head() {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("cannot resolve HEAD of {}", repo.path().display()));
            }
        }
        let mut rw = repo.revwalk()?;
        rw.push_head()?;

        let mut out = Vec::new();
        for oid in rw.take(max) {
            let commit = repo.find_commit(oid?)?;
            let secs = commit.committer().when().seconds();
            let committed_at = Utc.timestamp_opt(secs, 0).single();
            if committed_at.is_none() {
                warn!("Commit {} has an unrepresentable committer time {secs}", commit.id());
            }
            out.push(Commit {
                sha: commit.id().to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                committed_at,
                html_url: None,
            });
        }
        Ok(out)
    }
}

/// Every git repository directly under `root`, named after its directory.
#[derive(Debug, Clone)]
pub struct LocalRepos {
    root: PathBuf,
    max_commits: usize,
}

impl LocalRepos {
    pub fn new(root: impl Into<PathBuf>, max_commits: usize) -> Self {
        Self {
            root: root.into(),
            max_commits,
        }
    }

    fn path_of(&self, repo: &Repository) -> PathBuf {
        self.root.join(&repo.name)
    }
}

impl RepoSource for LocalRepos {
    fn repos(&self, user: &str) -> Result<Vec<Repository>> {
        let dir = fs::read_dir(&self.root)
            .with_context(|| format!("cannot list {}", self.root.display()))?;

        let mut names = Vec::new();
        for entry in dir {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if GitRepository::open(entry.path()).is_ok() {
                names.push(name);
            } else {
                debug!("Skipping {}: not a git repository", entry.path().display());
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| Repository {
                full_name: format!("{user}/{name}"),
                owner: user.to_string(),
                html_url: None,
                name,
            })
            .collect())
    }
}

impl CommitSource for LocalRepos {
    fn commits(&self, repo: &Repository) -> Result<Vec<Commit>> {
        RepoExt::open(&self.path_of(repo))?.head_commits(self.max_commits)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::init_with_commits;
    use super::*;

    #[test]
    fn lists_only_git_directories() {
        let root = tempfile::tempdir().unwrap();
        init_with_commits(&root.path().join("zeta"), &[("init", 1_000)]);
        init_with_commits(&root.path().join("alpha"), &[("init", 2_000)]);
        fs::create_dir(root.path().join("plain")).unwrap();
        fs::write(root.path().join("README"), "x").unwrap();

        let src = LocalRepos::new(root.path(), DEFAULT_MAX_COMMITS);
        let repos = src.repos("me").unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
        assert_eq!(repos[0].full_name, "me/alpha");
    }

    #[test]
    fn reads_head_commits_with_dates() {
        let root = tempfile::tempdir().unwrap();
        init_with_commits(
            &root.path().join("proj"),
            &[("first", 1_000), ("second\n\nbody", 2_000), ("third", 3_000)],
        );

        let src = LocalRepos::new(root.path(), 2);
        let repo = src.repos("me").unwrap().remove(0);
        let commits = src.commits(&repo).unwrap();

        assert_eq!(commits.len(), 2);
        let mut messages: Vec<_> = commits.iter().map(|c| c.subject()).collect();
        messages.sort();
        assert_eq!(messages, ["second", "third"]);
        assert!(commits.iter().all(|c| c.committed_at.is_some()));
    }

    #[test]
    fn unborn_head_has_no_commits() {
        let root = tempfile::tempdir().unwrap();
        git2::Repository::init(root.path().join("empty")).unwrap();

        let src = LocalRepos::new(root.path(), DEFAULT_MAX_COMMITS);
        let repo = src.repos("me").unwrap().remove(0);
        assert!(src.commits(&repo).unwrap().is_empty());
    }

    #[test]
    fn corrupt_head_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("broken");
        init_with_commits(&path, &[("init", 1_000)]);
        fs::write(path.join(".git").join("HEAD"), "this is not a ref\n").unwrap();

        let src = LocalRepos::new(root.path(), DEFAULT_MAX_COMMITS);
        let repo = Repository {
            name: "broken".into(),
            full_name: "me/broken".into(),
            owner: "me".into(),
            html_url: None,
        };
        assert!(src.commits(&repo).is_err());
    }

    #[test]
    fn missing_root_is_an_error() {
        let src = LocalRepos::new("/definitely/not/here", DEFAULT_MAX_COMMITS);
        assert!(src.repos("me").is_err());
    }
}
