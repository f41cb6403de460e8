use thiserror::Error;

/// Configuration errors raised before any repository is fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The sort order name is not one of `asc`, `ascending`, `desc`, `descending`.
    #[error("No sorting order for name {name:?} (expected asc, ascending, desc or descending)")]
    InvalidOrderingName { name: String },

    /// Markdown generation was requested without an element template.
    #[error("Markdown generation requested but no element template was given")]
    MissingTemplate,

    /// The strftime string cannot format a date.
    #[error("Invalid date format {format:?}")]
    InvalidDateFormat { format: String },
}

pub type Result<T> = std::result::Result<T, Error>;
