use anyhow::{bail, Context, Result};
use clap::Args;
use log::info;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::commands::Global;
use crate::config::{RawInputs, RunConfig};
use crate::pipeline;
use crate::presentation::table;
use crate::sources::git::{LocalRepos, DEFAULT_MAX_COMMITS};
use crate::sources::snapshot::Snapshot;

/// Rank a user's repositories by their latest commit.
///
/// Repositories come either from a snapshot of hosting-API responses or
/// from a directory of local git checkouts.
#[derive(Debug, Args)]
pub struct Rank {
    /// JSON file with captured repository and commit listings
    #[arg(long, value_name = "FILE", conflicts_with = "scan_dir", required_unless_present = "scan_dir")]
    pub snapshot: Option<PathBuf>,

    /// Directory whose subdirectories are git repositories
    #[arg(long, value_name = "DIR")]
    pub scan_dir: Option<PathBuf>,

    /// Owner of the repositories (defaults to the snapshot's user)
    #[arg(short, long, env = "TOPREPOS_USER")]
    pub user: Option<String>,

    /// Commits read per local repository
    #[arg(long, default_value_t = DEFAULT_MAX_COMMITS)]
    pub max_commits: usize,

    /// Display order: asc, ascending, desc or descending
    #[arg(short, long, env = "TOPREPOS_SORT_ORDER", default_value = "desc")]
    pub sort_order: String,

    /// Number of repositories to report (clamped to at least 1)
    #[arg(short = 'n', long, env = "TOPREPOS_ENTRY_COUNT", default_value_t = 5, allow_negative_numbers = true)]
    pub entry_count: i64,

    /// Also render the report through the markdown templates
    #[arg(long, env = "TOPREPOS_GENERATE_MARKDOWN")]
    pub generate_markdown: bool,

    /// Text placed before the rendered entries
    #[arg(long, env = "TOPREPOS_MD_HEADER", default_value = "")]
    pub md_header: String,

    /// Template for one entry, e.g. "- {{REPO}}: {{COMMITMSG}} ({{DATE}})"
    #[arg(long, env = "TOPREPOS_MD_TEMPLATE")]
    pub md_template: Option<String>,

    /// strftime format for {{DATE}} (default: RFC 3339)
    #[arg(long)]
    pub date_format: Option<String>,

    /// Write the rendered markdown to this file
    #[arg(short, long, value_name = "FILE", requires = "generate_markdown")]
    pub output: Option<PathBuf>,

    /// JSON output (overrides global --json)
    #[arg(long)]
    pub json: bool,
}

impl super::Runnable for Rank {
    fn run(self, g: &Global) -> Result<()> {
        let json = self.json || g.json;

        // Validate before touching any source.
        let config = RunConfig::from_inputs(RawInputs {
            user: self.user.clone().unwrap_or_default(),
            sort_order: self.sort_order.clone(),
            entry_count: self.entry_count,
            md_header: self.md_header.clone(),
            md_template: self.md_template.clone(),
            date_format: self.date_format.clone(),
            generate_markdown: self.generate_markdown,
        })?;

        let report = match (&self.snapshot, &self.scan_dir) {
            (Some(path), _) => {
                let snapshot = Snapshot::open(path)?;
                let user = self
                    .user
                    .clone()
                    .or_else(|| snapshot.user().map(str::to_string))
                    .unwrap_or_default();
                pipeline::run(&RunConfig { user, ..config.clone() }, &snapshot, &snapshot)?
            }
            (None, Some(dir)) => {
                let user = self.user.clone().unwrap_or_else(|| "local".to_string());
                let local = LocalRepos::new(dir, self.max_commits);
                pipeline::run(&RunConfig { user, ..config.clone() }, &local, &local)?
            }
            (None, None) => bail!("one of --snapshot or --scan-dir is required"),
        };

        if let (Some(path), Some(md)) = (&self.output, &report.markdown) {
            fs::write(path, md).with_context(|| format!("cannot write {}", path.display()))?;
            info!("Wrote markdown to {}", path.display());
        }

        if json {
            let payload = json!({
                "sortOrder": config.order.to_string(),
                "topRepos": report.top_repos,
                "markdown": report.markdown,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        println!("🏆 Most recently active repositories");
        println!("{}", table::top_repos(&report.top_repos));
        if let Some(md) = &report.markdown {
            println!();
            println!("{md}");
        }
        Ok(())
    }
}
