use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::engine::{
    apply_filters, FilterEngine, MapViewport, RenderTarget, TableState, ViewKind,
};
use crate::error::{DirectoryError, Result};
use crate::models::{CallRecord, CuisineRecord, FilterState, RestaurantRecord, TableKind};
use crate::source::{decode_rows, CanonicalTable, RowAdapter, RowSource};

/// How a page view ended up on the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Rendered,
    NotFound,
    LoadFailed,
}

/// All three tables after a concurrent load. Each table settles on its own.
#[derive(Debug)]
pub struct DirectorySnapshot {
    pub cuisines: TableState<CuisineRecord>,
    pub restaurants: TableState<RestaurantRecord>,
    pub calls: TableState<CallRecord>,
}

/// Loads directory tables from a row source and drives page views.
#[derive(Clone)]
pub struct Directory {
    source: Arc<dyn RowSource>,
    adapter: RowAdapter,
    viewport: MapViewport,
}

impl Directory {
    pub fn new(source: Arc<dyn RowSource>, adapter: RowAdapter, viewport: MapViewport) -> Self {
        Self {
            source,
            adapter,
            viewport,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.row_source()?,
            RowAdapter::new(config.source.schema),
            config.viewport(),
        ))
    }

    /// Fetch, decode and adapt one table.
    pub async fn load_table(&self, table: TableKind) -> Result<CanonicalTable> {
        let bytes = self.source.fetch_table(table).await.map_err(|e| {
            error!("Error loading {}: {}", self.source.location(table), e);
            e
        })?;

        let rows = decode_rows(&bytes)?;
        let records = self.adapter.adapt(table, &rows);
        info!("Parsed {} {} records", records.len(), table);
        Ok(records)
    }

    pub async fn load_cuisines(&self) -> Result<Vec<CuisineRecord>> {
        match self.load_table(TableKind::Cuisine).await? {
            CanonicalTable::Cuisines(records) => Ok(records),
            other => Err(unexpected_table(TableKind::Cuisine, &other)),
        }
    }

    pub async fn load_restaurants(&self) -> Result<Vec<RestaurantRecord>> {
        match self.load_table(TableKind::Restaurant).await? {
            CanonicalTable::Restaurants(records) => Ok(records),
            other => Err(unexpected_table(TableKind::Restaurant, &other)),
        }
    }

    pub async fn load_calls(&self) -> Result<Vec<CallRecord>> {
        match self.load_table(TableKind::Call).await? {
            CanonicalTable::Calls(records) => Ok(records),
            other => Err(unexpected_table(TableKind::Call, &other)),
        }
    }

    /// Load every table concurrently. A failure only affects its own table.
    pub async fn load_all(&self) -> DirectorySnapshot {
        let (cuisines, restaurants, calls) = tokio::join!(
            self.load_cuisines(),
            self.load_restaurants(),
            self.load_calls()
        );

        DirectorySnapshot {
            cuisines: cuisines.into(),
            restaurants: restaurants.into(),
            calls: calls.into(),
        }
    }

    /// Every cuisine as a tile.
    pub async fn show_cuisine_index<T: RenderTarget + ?Sized>(&self, target: &mut T) -> ViewStatus {
        target.render_loading(TableKind::Cuisine);
        match self.load_cuisines().await {
            Ok(cuisines) => {
                target.render_cuisine_tiles(&cuisines);
                ViewStatus::Rendered
            }
            Err(e) => render_failure(target, TableKind::Cuisine, &e),
        }
    }

    /// Restaurants serving `cuisine` (all restaurants when `None`), with an
    /// optional highlighted tile.
    pub async fn show_cuisine<T: RenderTarget + ?Sized>(
        &self,
        cuisine: Option<&str>,
        selected_id: Option<&str>,
        target: &mut T,
    ) -> ViewStatus {
        target.render_loading(TableKind::Restaurant);
        let restaurants = match self.load_restaurants().await {
            Ok(restaurants) => restaurants,
            Err(e) => return render_failure(target, TableKind::Restaurant, &e),
        };

        let filter = FilterState {
            cuisine: cuisine.map(str::to_string),
            ..FilterState::default()
        };
        let matches = apply_filters(&restaurants, &filter);
        debug!(
            "{} of {} restaurants serve {:?}",
            matches.len(),
            restaurants.len(),
            cuisine
        );

        let selected_id = selected_id.filter(|id| matches.iter().any(|r| r.id == *id));
        target.render_tile_list(&matches, selected_id);
        ViewStatus::Rendered
    }

    /// Profile of one restaurant plus its call log.
    ///
    /// The call table is only fetched once the restaurant is known to exist.
    /// A failed call fetch still renders the profile, without calls.
    pub async fn show_profile<T: RenderTarget + ?Sized>(
        &self,
        restaurant_id: &str,
        target: &mut T,
    ) -> ViewStatus {
        target.render_loading(TableKind::Restaurant);
        let restaurants = match self.load_restaurants().await {
            Ok(restaurants) => restaurants,
            Err(e) => return render_failure(target, TableKind::Restaurant, &e),
        };

        let Some(restaurant) = restaurants.iter().find(|r| r.id == restaurant_id) else {
            let err = DirectoryError::NotFound(format!("restaurant '{restaurant_id}'"));
            warn!("{}", err);
            target.render_not_found(restaurant_id);
            return ViewStatus::NotFound;
        };

        let calls = match self.load_calls().await {
            Ok(calls) => calls,
            Err(e) => {
                warn!("Rendering {} without calls: {}", restaurant_id, e);
                Vec::new()
            }
        };

        let related: Vec<&CallRecord> = calls
            .iter()
            .filter(|call| call.restaurant_id == restaurant_id)
            .collect();
        target.render_profile(restaurant, &related);
        ViewStatus::Rendered
    }

    /// Load restaurants into a map engine, populate the facet controls and
    /// render the initial markers. The engine is returned so the caller can
    /// feed it filter changes.
    pub async fn open_map<T: RenderTarget + ?Sized>(&self, target: &mut T) -> FilterEngine {
        let mut engine = FilterEngine::new(ViewKind::Map, self.viewport);
        engine.begin_loading(target);
        let result = self.load_restaurants().await;
        engine.finish_loading(result, target);
        engine
    }
}

fn render_failure<T: RenderTarget + ?Sized>(
    target: &mut T,
    table: TableKind,
    err: &DirectoryError,
) -> ViewStatus {
    let reason = err.load_failure_reason(table);
    if err.is_fetch_failure() {
        error!("{}", reason);
    } else {
        error!("{} table arrived but could not be decoded: {}", table, err);
    }
    target.render_load_failed(table, &reason);
    ViewStatus::LoadFailed
}

fn unexpected_table(expected: TableKind, got: &CanonicalTable) -> DirectoryError {
    DirectoryError::Parse(format!(
        "expected {expected} records, adapter produced {}",
        got.kind()
    ))
}
