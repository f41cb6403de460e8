use chrono::{DateTime, Utc};
use log::warn;

use super::model::{RepoCommitMap, RepoEntry};
use super::order::OrderingPolicy;

/// Ranking key of a repository: date of its first (latest) commit.
///
/// A missing date, or a repository without commits, counts as the epoch.
pub fn ranking_key(entry: &RepoEntry) -> DateTime<Utc> {
    entry
        .latest()
        .and_then(|c| c.committed_at)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Orders repositories by their latest commit date.
///
/// Expects each commit list to be sequenced already; the first commit of
/// each list is taken as the latest one. Returns a new map with the same
/// keys.
pub fn rank(map: &RepoCommitMap, policy: OrderingPolicy) -> RepoCommitMap {
    let mut entries: Vec<&RepoEntry> = map.iter().collect();

    for e in entries.iter().filter(|e| e.commits.is_empty()) {
        warn!("Repo {} has no commits; ranking it at the epoch", e.repo.full_name);
    }

    entries.sort_by(|a, b| policy.apply(ranking_key(a).cmp(&ranking_key(b))));
    entries.into_iter().cloned().collect()
}
