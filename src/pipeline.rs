use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::RunConfig;
use crate::domain::model::RepoCommitMap;
use crate::domain::order::OrderingPolicy;
use crate::domain::rank::rank;
use crate::domain::report::{project_sorted, RepoStats};
use crate::domain::sequence::sequence;
use crate::sources::{CommitSource, RepoSource};
use crate::utils::fmt_date;

/// Final artifacts of a run.
#[derive(Debug, Clone)]
pub struct Report {
    pub top_repos: Vec<RepoStats>,
    pub markdown: Option<String>,
}

/// Fetches every repository of `user` and its commits, one repository at a
/// time, sequencing each commit list as it arrives.
pub fn collect(
    repos: &dyn RepoSource,
    commits: &dyn CommitSource,
    user: &str,
    order: OrderingPolicy,
) -> Result<RepoCommitMap> {
    info!("Getting repos for user {user}");
    let listed = repos
        .repos(user)
        .with_context(|| format!("cannot list repos for {user}"))?;
    info!("Got {} repos", listed.len());

    let mut map = RepoCommitMap::new();
    for repo in listed {
        let fetched = commits
            .commits(&repo)
            .with_context(|| format!("cannot get commits for {}", repo.full_name))?;
        let sorted = sequence(&fetched, order);
        info!(
            "Sorted commits for repo {}. Latest commit date: {}",
            repo.full_name,
            fmt_date(sorted.first().and_then(|c| c.committed_at))
        );
        map.insert(repo, sorted);
    }
    if map.is_empty() {
        warn!("No repos found for user {user}");
    }
    Ok(map)
}

/// Collects, ranks, projects and optionally renders. Any source error aborts
/// the run before a report is produced.
pub fn run(config: &RunConfig, repos: &dyn RepoSource, commits: &dyn CommitSource) -> Result<Report> {
    let map = collect(repos, commits, &config.user, config.initial_order)?;
    let ranked = rank(&map, config.initial_order);
    info!(
        "Sorted all {} repos: {}",
        ranked.len(),
        ranked.names().collect::<Vec<_>>().join(", ")
    );

    info!("Getting first {} repos", config.entry_count.get());
    let top_repos = project_sorted(&ranked, config.entry_count, config.order);

    let markdown = config.renderer.as_ref().map(|r| {
        info!("Generating markdown");
        r.render(&top_repos)
    });

    Ok(Report { top_repos, markdown })
}
