use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{RepoCommitMap, RepoEntry};
use super::order::OrderingPolicy;
use crate::utils::EntryCount;

/// Flat report record for one repository's latest commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub repo: String,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub commit_url: String,
    pub commit_msg: String,
    /// Serialized as an RFC 3339 string, or `""` when unknown.
    #[serde(with = "date_or_empty", default)]
    pub date: Option<DateTime<Utc>>,
}

impl RepoStats {
    fn from_entry(entry: &RepoEntry) -> Self {
        let latest = entry.latest();
        Self {
            repo: entry.name().to_string(),
            repo_url: entry.repo.html_url.clone().unwrap_or_default(),
            commit_url: latest.and_then(|c| c.html_url.clone()).unwrap_or_default(),
            commit_msg: latest.map(|c| c.subject().to_string()).unwrap_or_default(),
            date: latest.and_then(|c| c.committed_at),
        }
    }
}

/// First `limit` entries of `map`, in map order, flattened to `RepoStats`.
pub fn project(map: &RepoCommitMap, limit: EntryCount) -> Vec<RepoStats> {
    map.iter()
        .take(limit.get())
        .map(RepoStats::from_entry)
        .collect()
}

/// Like [`project`], then re-sorted by date for display. Unknown dates count
/// as the epoch, same as when ranking repositories.
pub fn project_sorted(
    map: &RepoCommitMap,
    limit: EntryCount,
    policy: OrderingPolicy,
) -> Vec<RepoStats> {
    let mut stats = project(map, limit);
    sort_stats(&mut stats, policy);
    stats
}

pub fn sort_stats(stats: &mut [RepoStats], policy: OrderingPolicy) {
    stats.sort_by(|a, b| {
        let a = a.date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let b = b.date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        policy.apply(a.cmp(&b))
    });
}

pub(crate) fn fmt_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}

mod date_or_empty {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(dt) => s.serialize_str(&super::fmt_timestamp(dt)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        // Plain calendar days are read as midnight UTC.
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(|d| Some(d.and_time(chrono::NaiveTime::MIN).and_utc()))
            .map_err(|_| serde::de::Error::custom(format!("invalid date {raw:?}")))
    }
}
