use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{DirectoryError, Result};
use crate::models::TableKind;

/// File names of the three tables relative to a source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFiles {
    pub cuisine: String,
    pub restaurant: String,
    pub call: String,
}

impl TableFiles {
    pub fn file_for(&self, table: TableKind) -> &str {
        match table {
            TableKind::Cuisine => &self.cuisine,
            TableKind::Restaurant => &self.restaurant,
            TableKind::Call => &self.call,
        }
    }
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            cuisine: "Cuisine.csv".to_string(),
            restaurant: "Restaurant.csv".to_string(),
            call: "Call.csv".to_string(),
        }
    }
}

/// Read-only supplier of raw table bytes.
///
/// Every failure is reported as [`DirectoryError::Fetch`] for that table
/// alone; callers decide whether sibling tables are affected.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable location of a table, for logs.
    fn location(&self, table: TableKind) -> String;

    async fn fetch_table(&self, table: TableKind) -> Result<Vec<u8>>;
}

/// Tables stored as files under a local directory.
#[derive(Debug, Clone)]
pub struct FileRowSource {
    root: PathBuf,
    files: TableFiles,
}

impl FileRowSource {
    pub fn new(root: impl Into<PathBuf>, files: TableFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    fn path_for(&self, table: TableKind) -> PathBuf {
        self.root.join(self.files.file_for(table))
    }
}

#[async_trait]
impl RowSource for FileRowSource {
    fn location(&self, table: TableKind) -> String {
        self.path_for(table).display().to_string()
    }

    async fn fetch_table(&self, table: TableKind) -> Result<Vec<u8>> {
        let path = self.path_for(table);
        info!("Fetching: {}", path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DirectoryError::fetch(table, format!("{}: {e}", path.display())))?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}

/// Tables published under a base URL.
#[derive(Clone)]
pub struct HttpRowSource {
    client: Client,
    base: Url,
    files: TableFiles,
}

impl HttpRowSource {
    pub fn new(base: Url, files: TableFiles, timeout_secs: u64) -> Result<Self> {
        if !matches!(base.scheme(), "http" | "https") {
            return Err(DirectoryError::Validation(format!(
                "Row source URL must be http(s): {base}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base: with_trailing_slash(base),
            files,
        })
    }

    pub fn url_for(&self, table: TableKind) -> Result<Url> {
        Ok(self.base.join(self.files.file_for(table))?)
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl RowSource for HttpRowSource {
    fn location(&self, table: TableKind) -> String {
        self.url_for(table)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.base, self.files.file_for(table)))
    }

    async fn fetch_table(&self, table: TableKind) -> Result<Vec<u8>> {
        let url = self.url_for(table)?;
        info!("Fetching: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DirectoryError::fetch(table, format!("{url}: {e}")))?;

        let status = response.status();
        debug!("Response status for {}: {}", url, status);
        if !status.is_success() {
            return Err(DirectoryError::fetch(
                table,
                format!("HTTP error! Status: {}", status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::fetch(table, format!("{url}: {e}")))?;

        Ok(bytes.to_vec())
    }
}
