//! Core of a static restaurant directory: canonical records adapted from
//! drifting CSV schemas, plus a filter, facet and map-marker engine that
//! drives an external render target.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod source;

pub use config::Config;
pub use engine::{FilterEngine, RecordingTarget, RenderTarget, ViewKind};
pub use error::{DirectoryError, Result};
pub use models::{
    CallRecord, ChainFilter, ChainStatus, Coordinates, CuisineRecord, FacetColumn, FilterState,
    RestaurantRecord, TableKind,
};
pub use services::{Directory, DirectorySnapshot, ViewStatus};
