use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::model::Commit;
use super::order::OrderingPolicy;

/// Compares two optional commit dates. Undated commits always sort after
/// dated ones, whatever the policy.
pub fn compare_commit_dates(
    a: Option<&DateTime<Utc>>,
    b: Option<&DateTime<Utc>>,
    policy: OrderingPolicy,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => policy.apply(a.cmp(b)),
    }
}

/// Returns a copy of `commits` ordered by committer date.
///
/// The sort is stable: commits sharing a date keep their arrival order.
pub fn sequence(commits: &[Commit], policy: OrderingPolicy) -> Vec<Commit> {
    let mut out = commits.to_vec();
    out.sort_by(|a, b| compare_commit_dates(a.committed_at.as_ref(), b.committed_at.as_ref(), policy));
    out
}
