//! Where repositories and their commits come from.
//!
//! The ranking pipeline only sees these two traits. Errors are passed
//! through untouched, so a failing source aborts the whole run.

use anyhow::Result;

use crate::domain::model::{Commit, Repository};

pub mod git;
pub mod snapshot;

/// Lists the public repositories of a user, in source order.
pub trait RepoSource {
    fn repos(&self, user: &str) -> Result<Vec<Repository>>;
}

/// Lists the commits of one repository in arrival order (not necessarily
/// by date). May be empty.
pub trait CommitSource {
    fn commits(&self, repo: &Repository) -> Result<Vec<Commit>>;
}
