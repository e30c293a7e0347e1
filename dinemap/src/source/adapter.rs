use tracing::debug;

use super::schema::{ColumnMap, SchemaMode, SchemaRevision};
use super::RawRow;
use crate::models::{
    CallRecord, ChainStatus, Coordinates, CuisineRecord, RestaurantRecord, TableKind,
};

/// A table after adaptation into canonical records.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalTable {
    Cuisines(Vec<CuisineRecord>),
    Restaurants(Vec<RestaurantRecord>),
    Calls(Vec<CallRecord>),
}

impl CanonicalTable {
    pub fn kind(&self) -> TableKind {
        match self {
            Self::Cuisines(_) => TableKind::Cuisine,
            Self::Restaurants(_) => TableKind::Restaurant,
            Self::Calls(_) => TableKind::Call,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Cuisines(records) => records.len(),
            Self::Restaurants(records) => records.len(),
            Self::Calls(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps raw rows onto canonical records.
///
/// Rows are never dropped. A missing column or a malformed value degrades
/// only the affected field: empty string, `ChainStatus::Unknown` or absent
/// coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowAdapter {
    mode: SchemaMode,
}

impl RowAdapter {
    pub fn new(mode: SchemaMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SchemaMode {
        self.mode
    }

    pub fn adapt(&self, kind: TableKind, rows: &[RawRow]) -> CanonicalTable {
        match kind {
            TableKind::Cuisine => CanonicalTable::Cuisines(self.cuisines(rows)),
            TableKind::Restaurant => CanonicalTable::Restaurants(self.restaurants(rows)),
            TableKind::Call => CanonicalTable::Calls(self.calls(rows)),
        }
    }

    pub fn cuisines(&self, rows: &[RawRow]) -> Vec<CuisineRecord> {
        let columns = self.columns_for(TableKind::Cuisine, rows);
        rows.iter()
            .map(|row| CuisineRecord {
                id: text(columns, row, columns.cuisine_id),
                image_url: text(columns, row, columns.cuisine_image),
            })
            .collect()
    }

    pub fn restaurants(&self, rows: &[RawRow]) -> Vec<RestaurantRecord> {
        let columns = self.columns_for(TableKind::Restaurant, rows);
        rows.iter()
            .map(|row| restaurant_from_row(columns, row))
            .collect()
    }

    pub fn calls(&self, rows: &[RawRow]) -> Vec<CallRecord> {
        let columns = self.columns_for(TableKind::Call, rows);
        rows.iter()
            .map(|row| CallRecord {
                restaurant_id: text(columns, row, columns.call_restaurant_id),
                date: text(columns, row, columns.call_date),
                sentiment: text(columns, row, columns.call_sentiment),
                recommendation: text(columns, row, columns.call_recommendation),
                highlights: text(columns, row, columns.call_highlights),
            })
            .collect()
    }

    fn columns_for(&self, kind: TableKind, rows: &[RawRow]) -> &'static ColumnMap {
        let revision: SchemaRevision = self.mode.resolve(kind, rows);
        debug!("Adapting {} {} rows with {} schema", rows.len(), kind, revision);
        revision.columns()
    }
}

fn restaurant_from_row(columns: &ColumnMap, row: &RawRow) -> RestaurantRecord {
    let id = text(columns, row, columns.restaurant_id);

    let chain_raw = columns.lookup(row, columns.chain).unwrap_or("");
    let chain = ChainStatus::from_raw(chain_raw);
    if chain == ChainStatus::Unknown && !chain_raw.trim().is_empty() {
        debug!(restaurant = %id, value = %chain_raw, "Unrecognized chain value");
    }

    let coordinates = raw_coordinates(columns, row).and_then(|raw| {
        let parsed = parse_coordinates(&raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            debug!(restaurant = %id, value = %raw, "Discarding invalid coordinates");
        }
        parsed
    });

    let keywords = columns.lookup(row, columns.cuisine_keywords).unwrap_or("");

    RestaurantRecord {
        name: text(columns, row, columns.name),
        cuisine_keywords: parse_keywords(keywords),
        chain,
        city: text(columns, row, columns.city),
        neighborhood: text(columns, row, columns.neighborhood),
        address: text(columns, row, columns.address),
        profile_image_url: text(columns, row, columns.profile_image),
        maps_link: text(columns, row, columns.maps_link),
        coordinates,
        operational: parse_operational(columns.lookup(row, columns.operational)),
        id,
    }
}

fn text(columns: &ColumnMap, row: &RawRow, aliases: &[&str]) -> String {
    columns
        .lookup(row, aliases)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Combined `Coordinates` column, or split latitude/longitude joined as `lat,lon`.
fn raw_coordinates(columns: &ColumnMap, row: &RawRow) -> Option<String> {
    if let Some(raw) = columns.lookup(row, columns.coordinates) {
        return Some(raw.to_string());
    }

    let latitude = columns.lookup(row, columns.latitude)?;
    let longitude = columns.lookup(row, columns.longitude)?;
    Some(format!("{latitude},{longitude}"))
}

/// Parse `"lat,lon"` into coordinates.
///
/// Wrapping quotes are stripped first. Anything other than exactly two finite
/// in-range numbers yields `None`.
pub fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    let tokens: Vec<&str> = strip_quotes(raw).split(',').collect();
    let [latitude, longitude] = tokens.as_slice() else {
        return None;
    };

    let latitude = strip_quotes(latitude).parse::<f64>().ok()?;
    let longitude = strip_quotes(longitude).parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude)
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim()
}

/// Split a comma-separated keyword list. Tokens are trimmed, empty tokens
/// dropped, order and duplicates kept.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Absent or blank means operational; older tables have no such column.
fn parse_operational(raw: Option<&str>) -> bool {
    match raw.map(|v| v.trim().to_lowercase()) {
        Some(value) => !matches!(value.as_str(), "n" | "no" | "false" | "0" | "closed"),
        None => true,
    }
}
