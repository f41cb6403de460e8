use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::commands::Global;
use crate::domain::report::RepoStats;
use crate::presentation::template::TemplateRenderer;

/// Render a saved top-repos report through a template.
#[derive(Debug, Args)]
pub struct Render {
    /// Output of `rank --json`, or a bare array of entries
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Template for one entry, e.g. "- {{REPO}}: {{COMMITMSG}} ({{DATE}})"
    #[arg(long, env = "TOPREPOS_MD_TEMPLATE")]
    pub md_template: String,

    /// Text placed before the rendered entries
    #[arg(long, env = "TOPREPOS_MD_HEADER", default_value = "")]
    pub md_header: String,

    /// strftime format for {{DATE}} (default: RFC 3339)
    #[arg(long)]
    pub date_format: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SavedReport {
    Wrapped {
        #[serde(rename = "topRepos")]
        top_repos: Vec<RepoStats>,
    },
    Bare(Vec<RepoStats>),
}

impl SavedReport {
    fn into_stats(self) -> Vec<RepoStats> {
        match self {
            SavedReport::Wrapped { top_repos } => top_repos,
            SavedReport::Bare(v) => v,
        }
    }
}

impl super::Runnable for Render {
    fn run(self, g: &Global) -> Result<()> {
        let mut renderer = TemplateRenderer::new(self.md_template, self.md_header);
        if let Some(f) = self.date_format {
            renderer = renderer.with_date_format(f)?;
        }

        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("cannot read {}", self.input.display()))?;
        let saved: SavedReport = serde_json::from_str(&text)
            .with_context(|| format!("cannot parse {}", self.input.display()))?;
        let md = renderer.render(&saved.into_stats());

        if g.json || self.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "markdown": md }))?);
        } else {
            println!("{md}");
        }
        Ok(())
    }
}
