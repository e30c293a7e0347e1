use std::env;
use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::engine::MapViewport;
use crate::error::Result;
use crate::models::Coordinates;
use crate::source::{FileRowSource, HttpRowSource, RowSource, SchemaMode, TableFiles};

/// Parsed value of `var`, or `None` when it is unset or does not parse.
/// A value that fails to parse is logged.
fn parse_env_opt<T>(var: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(var).ok()?;
    raw.parse()
        .map_err(|e| tracing::warn!("Ignoring {}={:?}: {}", var, raw, e))
        .ok()
}

fn parse_env_or<T>(var: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_env_opt(var).unwrap_or(default)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Local directory or `http(s)://` base URL holding the tables.
    pub base: String,
    pub cuisine_file: String,
    pub restaurant_file: String,
    pub call_file: String,
    pub timeout_secs: u64,
    pub schema: SchemaMode,
}

/// Initial map view, kept while no markers are shown.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    pub center: Coordinates,
    pub zoom: u8,
}

const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 29.4241,
    longitude: -98.4936,
};

impl Default for SourceConfig {
    fn default() -> Self {
        let files = TableFiles::default();
        Self {
            base: "data".to_string(),
            cuisine_file: files.cuisine,
            restaurant_file: files.restaurant,
            call_file: files.call,
            timeout_secs: 30,
            schema: SchemaMode::Auto,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let source = SourceConfig::default();
        let map = MapConfig::default();
        Self {
            source: SourceConfig {
                base: env::var("DINEMAP_DATA_BASE").unwrap_or(source.base),
                cuisine_file: env::var("DINEMAP_CUISINE_FILE").unwrap_or(source.cuisine_file),
                restaurant_file: env::var("DINEMAP_RESTAURANT_FILE")
                    .unwrap_or(source.restaurant_file),
                call_file: env::var("DINEMAP_CALL_FILE").unwrap_or(source.call_file),
                timeout_secs: parse_env_or("DINEMAP_FETCH_TIMEOUT", source.timeout_secs),
                schema: parse_env_or("DINEMAP_SCHEMA", source.schema),
            },
            map: MapConfig {
                center: parse_env_or("DINEMAP_MAP_CENTER", map.center),
                zoom: parse_env_or("DINEMAP_MAP_ZOOM", map.zoom),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Apply a `.env` file if present, then read the environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_env()
    }

    pub fn table_files(&self) -> TableFiles {
        TableFiles {
            cuisine: self.source.cuisine_file.clone(),
            restaurant: self.source.restaurant_file.clone(),
            call: self.source.call_file.clone(),
        }
    }

    pub fn viewport(&self) -> MapViewport {
        MapViewport::new(self.map.center, self.map.zoom)
    }

    /// HTTP backend for `http(s)` bases, file backend for everything else.
    pub fn row_source(&self) -> Result<Arc<dyn RowSource>> {
        match remote_base(&self.source.base) {
            Some(url) => {
                tracing::info!("Using HTTP row source at {}", url);
                Ok(Arc::new(HttpRowSource::new(
                    url,
                    self.table_files(),
                    self.source.timeout_secs,
                )?))
            }
            None => {
                tracing::info!("Using file row source at {}", self.source.base);
                Ok(Arc::new(FileRowSource::new(
                    &self.source.base,
                    self.table_files(),
                )))
            }
        }
    }
}

fn remote_base(base: &str) -> Option<Url> {
    Url::parse(base)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
