mod facets;
mod filter;
mod markers;
mod render;
mod state;

pub use facets::compute_facets;
pub use filter::{apply_filters, matches};
pub use markers::{build_markers, Bounds, MapViewport, Marker, MarkerLayer};
pub use render::{RecordingTarget, RenderEvent, RenderTarget};
pub use state::TableState;

use tracing::debug;

use crate::error::Result;
use crate::models::{FacetColumn, FilterState, RestaurantRecord, TableKind};

/// Which view the engine keeps up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    TileList,
    Map,
}

/// Restaurant table, filter selection and map state for one page view.
///
/// Every change to the records, the filter or the selection re-renders the
/// view from scratch; no state carries over between renders except the
/// viewport.
#[derive(Debug)]
pub struct FilterEngine {
    view: ViewKind,
    restaurants: TableState<RestaurantRecord>,
    filter: FilterState,
    selected_id: Option<String>,
    layer: MarkerLayer,
    viewport: MapViewport,
}

impl FilterEngine {
    pub fn new(view: ViewKind, viewport: MapViewport) -> Self {
        Self {
            view,
            restaurants: TableState::default(),
            filter: FilterState::default(),
            selected_id: None,
            layer: MarkerLayer::default(),
            viewport,
        }
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn state(&self) -> &TableState<RestaurantRecord> {
        &self.restaurants
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    pub fn markers(&self) -> &[Marker] {
        self.layer.markers()
    }

    pub fn begin_loading<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        if self.restaurants.begin_loading() {
            target.render_loading(TableKind::Restaurant);
        }
    }

    /// Settle the restaurant load, fill the facet controls and render.
    pub fn finish_loading<T: RenderTarget + ?Sized>(
        &mut self,
        result: Result<Vec<RestaurantRecord>>,
        target: &mut T,
    ) {
        if !self.restaurants.finish(result) {
            return;
        }
        if self.view == ViewKind::Map {
            self.populate_controls(target);
        }
        self.refresh(target);
    }

    pub fn set_filter<T: RenderTarget + ?Sized>(&mut self, filter: FilterState, target: &mut T) {
        self.filter = filter;
        self.refresh(target);
    }

    pub fn update_filter<T, F>(&mut self, target: &mut T, update: F)
    where
        T: RenderTarget + ?Sized,
        F: FnOnce(&mut FilterState),
    {
        update(&mut self.filter);
        self.refresh(target);
    }

    /// Emphasize one record. Does not affect matching or bounds.
    pub fn select<T: RenderTarget + ?Sized>(&mut self, id: Option<String>, target: &mut T) {
        self.selected_id = id;
        self.refresh(target);
    }

    /// Matching records in source order; empty until loaded.
    pub fn matches(&self) -> Vec<&RestaurantRecord> {
        self.restaurants
            .records()
            .map(|records| apply_filters(records, &self.filter))
            .unwrap_or_default()
    }

    /// Facet values over the whole table; empty until loaded.
    pub fn facets(&self, column: FacetColumn) -> Vec<String> {
        self.restaurants
            .records()
            .map(|records| compute_facets(records, column))
            .unwrap_or_default()
    }

    pub fn populate_controls<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        for column in FacetColumn::ALL {
            target.populate_facet_control(column, &self.facets(column));
        }
    }

    /// Recompute matches from current state and push them to the target.
    pub fn refresh<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        match &self.restaurants {
            TableState::Loaded(records) => {
                let matches = apply_filters(records, &self.filter);
                debug!(
                    "Filter matched {} of {} restaurants",
                    matches.len(),
                    records.len()
                );

                match self.view {
                    ViewKind::TileList => {
                        let selected_id = self
                            .selected_id
                            .as_deref()
                            .filter(|id| matches.iter().any(|r| r.id == *id));
                        target.render_tile_list(&matches, selected_id);
                    }
                    ViewKind::Map => {
                        let markers = build_markers(&matches, self.selected_id.as_deref());
                        target.clear_markers();
                        let retracted = self.layer.replace(markers);
                        if !self.viewport.fit(self.layer.markers()) {
                            debug!("No markers to fit; keeping current viewport");
                        }
                        debug!(
                            "Replaced {} markers with {}",
                            retracted,
                            self.layer.markers().len()
                        );
                        target.render_map_markers(self.layer.markers(), &self.viewport);
                    }
                }
            }
            TableState::LoadFailed(reason) => {
                target.render_load_failed(TableKind::Restaurant, reason);
            }
            TableState::Unloaded | TableState::Loading => {
                target.render_loading(TableKind::Restaurant);
            }
        }
    }
}
