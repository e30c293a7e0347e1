use thiserror::Error;

use crate::models::TableKind;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to fetch {table} table: {reason}")]
    Fetch { table: TableKind, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl DirectoryError {
    pub fn fetch(table: TableKind, reason: impl Into<String>) -> Self {
        DirectoryError::Fetch {
            table,
            reason: reason.into(),
        }
    }

    /// True for transport failures (the table never arrived).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, DirectoryError::Fetch { .. } | DirectoryError::Http(_))
    }

    /// Message for the load-failed view of `table`. Transport failures and
    /// tables that arrived but could not be read are worded apart.
    pub fn load_failure_reason(&self, table: TableKind) -> String {
        match self {
            DirectoryError::Fetch { .. } => self.to_string(),
            err if err.is_fetch_failure() => format!("Failed to fetch {table} table: {err}"),
            err => format!("Failed to read {table} table: {err}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
