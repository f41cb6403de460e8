use chrono::{DateTime, Utc};

/// Largest entry count accepted; 2^53 - 1, capped by the platform's `usize`.
pub const MAX_ENTRY_COUNT: u64 = (1 << 53) - 1;

/// Number of report entries, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryCount(usize);

impl EntryCount {
    /// Clamps `requested` into `1..=MAX_ENTRY_COUNT`.
    pub fn new(requested: i64) -> Self {
        let n = requested.max(1).unsigned_abs().min(MAX_ENTRY_COUNT);
        Self(usize::try_from(n).unwrap_or(usize::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

pub fn fmt_date(dt: Option<DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}
