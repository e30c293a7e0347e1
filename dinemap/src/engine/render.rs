use serde::Serialize;

use super::markers::{MapViewport, Marker};
use crate::models::{CallRecord, CuisineRecord, FacetColumn, RestaurantRecord, TableKind};

/// Display side of a directory page. Implementations own all presentation;
/// the engine only hands them data.
pub trait RenderTarget {
    fn render_cuisine_tiles(&mut self, cuisines: &[CuisineRecord]);

    fn render_tile_list(&mut self, records: &[&RestaurantRecord], selected_id: Option<&str>);

    fn render_profile(&mut self, record: &RestaurantRecord, calls: &[&CallRecord]);

    /// Remove every marker added by earlier renders.
    fn clear_markers(&mut self);

    fn render_map_markers(&mut self, markers: &[Marker], viewport: &MapViewport);

    fn populate_facet_control(&mut self, column: FacetColumn, values: &[String]);

    fn render_not_found(&mut self, what: &str);

    fn render_load_failed(&mut self, table: TableKind, reason: &str);

    fn render_loading(&mut self, _table: TableKind) {}
}

/// Serializable record of one render call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    CuisineTiles {
        ids: Vec<String>,
    },
    TileList {
        ids: Vec<String>,
        selected_id: Option<String>,
    },
    Profile {
        id: String,
        call_dates: Vec<String>,
    },
    ClearMarkers,
    MapMarkers {
        markers: Vec<Marker>,
        viewport: MapViewport,
    },
    FacetControl {
        column: FacetColumn,
        values: Vec<String>,
    },
    NotFound {
        what: String,
    },
    LoadFailed {
        table: TableKind,
        reason: String,
    },
    Loading {
        table: TableKind,
    },
}

/// Target that keeps every render call, for snapshots handed to a UI
/// layer or inspected in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    events: Vec<RenderEvent>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&RenderEvent> {
        self.events.last()
    }

    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }
}

impl RenderTarget for RecordingTarget {
    fn render_cuisine_tiles(&mut self, cuisines: &[CuisineRecord]) {
        self.events.push(RenderEvent::CuisineTiles {
            ids: cuisines.iter().map(|c| c.id.clone()).collect(),
        });
    }

    fn render_tile_list(&mut self, records: &[&RestaurantRecord], selected_id: Option<&str>) {
        self.events.push(RenderEvent::TileList {
            ids: records.iter().map(|r| r.id.clone()).collect(),
            selected_id: selected_id.map(str::to_string),
        });
    }

    fn render_profile(&mut self, record: &RestaurantRecord, calls: &[&CallRecord]) {
        self.events.push(RenderEvent::Profile {
            id: record.id.clone(),
            call_dates: calls.iter().map(|c| c.date.clone()).collect(),
        });
    }

    fn clear_markers(&mut self) {
        self.events.push(RenderEvent::ClearMarkers);
    }

    fn render_map_markers(&mut self, markers: &[Marker], viewport: &MapViewport) {
        self.events.push(RenderEvent::MapMarkers {
            markers: markers.to_vec(),
            viewport: *viewport,
        });
    }

    fn populate_facet_control(&mut self, column: FacetColumn, values: &[String]) {
        self.events.push(RenderEvent::FacetControl {
            column,
            values: values.to_vec(),
        });
    }

    fn render_not_found(&mut self, what: &str) {
        self.events.push(RenderEvent::NotFound {
            what: what.to_string(),
        });
    }

    fn render_load_failed(&mut self, table: TableKind, reason: &str) {
        self.events.push(RenderEvent::LoadFailed {
            table,
            reason: reason.to_string(),
        });
    }

    fn render_loading(&mut self, table: TableKind) {
        self.events.push(RenderEvent::Loading { table });
    }
}
