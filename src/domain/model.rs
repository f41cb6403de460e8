use chrono::{DateTime, Utc};

/// A public repository as reported by a repository source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub html_url: Option<String>,
}

/// A commit as reported by a commit source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    /// Committer date; not every source can supply one.
    pub committed_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
}

impl Commit {
    /// Message up to (not including) the first newline.
    pub fn subject(&self) -> &str {
        match self.message.split_once('\n') {
            Some((first, _)) => first,
            None => &self.message,
        }
    }
}

/// One repository with its commits, latest first once sequenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub repo: Repository,
    pub commits: Vec<Commit>,
}

impl RepoEntry {
    pub fn name(&self) -> &str {
        &self.repo.name
    }

    pub fn latest(&self) -> Option<&Commit> {
        self.commits.first()
    }
}

/// Repositories keyed by name, in insertion order.
///
/// After ranking, iteration order is the rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoCommitMap {
    entries: Vec<RepoEntry>,
}

impl RepoCommitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `repo.name`. A replaced entry keeps
    /// its original position.
    pub fn insert(&mut self, repo: Repository, commits: Vec<Commit>) {
        match self.entries.iter_mut().find(|e| e.repo.name == repo.name) {
            Some(existing) => {
                existing.repo = repo;
                existing.commits = commits;
            }
            None => self.entries.push(RepoEntry { repo, commits }),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&RepoEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepoEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(RepoEntry::name)
    }
}

impl FromIterator<RepoEntry> for RepoCommitMap {
    fn from_iter<I: IntoIterator<Item = RepoEntry>>(iter: I) -> Self {
        let mut map = Self::new();
        for e in iter {
            map.insert(e.repo, e.commits);
        }
        map
    }
}

impl<'a> IntoIterator for &'a RepoCommitMap {
    type Item = &'a RepoEntry;
    type IntoIter = std::slice::Iter<'a, RepoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
