use crate::domain::report::RepoStats;
use crate::utils::fmt_date;
use comfy_table::{Table, presets::UTF8_HORIZONTAL_ONLY};

/// Ranked repositories as a terminal table.
pub fn top_repos(stats: &[RepoStats]) -> String {
    render(stats_to_rows(stats))
}

fn stats_to_rows(stats: &[RepoStats]) -> Vec<[String; 4]> {
    stats.iter().enumerate().map(|(i, s)| {
        [
            (i + 1).to_string(),
            s.repo.clone(),
            s.commit_msg.clone(),
            fmt_date(s.date),
        ]
    }).collect()
}

fn render(rows: Vec<[String; 4]>) -> String {
    let mut t = Table::new();
    t.load_preset(UTF8_HORIZONTAL_ONLY)
        .set_header(vec!["#", "Repo", "Latest commit", "Date"]);
    for r in rows {
        t.add_row(r);
    }
    t.to_string()
}
