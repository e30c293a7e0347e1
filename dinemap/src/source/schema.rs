use serde::{Deserialize, Serialize};

use super::RawRow;
use crate::models::TableKind;

/// Column layouts seen across published revisions of the directory tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchemaRevision {
    /// `Cuisine ID`, `Restaurant ID`, `Cuisine`, split `Latitude`/`Longitude`.
    Legacy,
    /// `ID`, `Name`, `CuisineKeywords`, combined `Coordinates`.
    Current,
}

impl SchemaRevision {
    pub fn columns(&self) -> &'static ColumnMap {
        match self {
            Self::Legacy => &LEGACY_COLUMNS,
            Self::Current => &CURRENT_COLUMNS,
        }
    }

    /// Guess the revision from the columns present in the first row.
    pub fn detect(kind: TableKind, rows: &[RawRow]) -> Self {
        let Some(first) = rows.first() else {
            return Self::Current;
        };

        let legacy_marker = match kind {
            TableKind::Cuisine => "Cuisine ID",
            TableKind::Restaurant => "Restaurant ID",
            // Call columns are identical in both revisions.
            TableKind::Call => return Self::Current,
        };

        if !first.has_column("ID") && first.has_column(legacy_marker) {
            Self::Legacy
        } else {
            Self::Current
        }
    }
}

impl std::fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Which revision the adapter applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    #[default]
    Auto,
    Fixed(SchemaRevision),
}

impl SchemaMode {
    pub fn resolve(&self, kind: TableKind, rows: &[RawRow]) -> SchemaRevision {
        match self {
            Self::Auto => SchemaRevision::detect(kind, rows),
            Self::Fixed(revision) => *revision,
        }
    }
}

impl std::str::FromStr for SchemaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "legacy" => Ok(Self::Fixed(SchemaRevision::Legacy)),
            "current" => Ok(Self::Fixed(SchemaRevision::Current)),
            _ => Err(format!("Unknown schema mode: {s}")),
        }
    }
}

/// Source column names for every canonical field, tried in order.
#[derive(Debug)]
pub struct ColumnMap {
    pub cuisine_id: &'static [&'static str],
    pub cuisine_image: &'static [&'static str],

    pub restaurant_id: &'static [&'static str],
    pub name: &'static [&'static str],
    pub cuisine_keywords: &'static [&'static str],
    pub chain: &'static [&'static str],
    pub city: &'static [&'static str],
    pub neighborhood: &'static [&'static str],
    pub address: &'static [&'static str],
    pub profile_image: &'static [&'static str],
    pub maps_link: &'static [&'static str],
    pub coordinates: &'static [&'static str],
    pub latitude: &'static [&'static str],
    pub longitude: &'static [&'static str],
    pub operational: &'static [&'static str],

    pub call_restaurant_id: &'static [&'static str],
    pub call_date: &'static [&'static str],
    pub call_sentiment: &'static [&'static str],
    pub call_recommendation: &'static [&'static str],
    pub call_highlights: &'static [&'static str],
}

impl ColumnMap {
    /// First alias present in the row.
    pub fn lookup<'a>(&self, row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
        aliases.iter().find_map(|alias| row.get(alias))
    }
}

const CALL_RESTAURANT_ID: &[&str] = &["RestaurantID"];
const CALL_DATE: &[&str] = &["Date"];
const CALL_SENTIMENT: &[&str] = &["Sentiment"];
const CALL_RECOMMENDATION: &[&str] = &["Recommendation"];
const CALL_HIGHLIGHTS: &[&str] = &["Highlights"];

static LEGACY_COLUMNS: ColumnMap = ColumnMap {
    cuisine_id: &["Cuisine ID"],
    cuisine_image: &["Cuisine Image"],

    restaurant_id: &["Restaurant ID"],
    // Legacy tables key restaurants by their display name.
    name: &["Restaurant ID"],
    cuisine_keywords: &["Cuisine"],
    chain: &["Chain"],
    city: &["City"],
    neighborhood: &["Neighborhood"],
    address: &["Address"],
    profile_image: &["Restaurant Image"],
    maps_link: &["Google Maps Link"],
    coordinates: &[],
    latitude: &["Latitude"],
    longitude: &["Longitude"],
    operational: &[],

    call_restaurant_id: CALL_RESTAURANT_ID,
    call_date: CALL_DATE,
    call_sentiment: CALL_SENTIMENT,
    call_recommendation: CALL_RECOMMENDATION,
    call_highlights: CALL_HIGHLIGHTS,
};

static CURRENT_COLUMNS: ColumnMap = ColumnMap {
    cuisine_id: &["ID", "Cuisine ID"],
    cuisine_image: &["Image", "Cuisine Image"],

    restaurant_id: &["ID"],
    name: &["Name"],
    cuisine_keywords: &["CuisineKeywords", "Cuisine Keywords"],
    chain: &["Chain"],
    city: &["City"],
    neighborhood: &["Neighborhood"],
    address: &["Address"],
    profile_image: &["ProfilePicture"],
    maps_link: &["MapsLink", "Google Maps Link"],
    coordinates: &["Coordinates"],
    latitude: &[],
    longitude: &[],
    operational: &["Operational"],

    call_restaurant_id: CALL_RESTAURANT_ID,
    call_date: CALL_DATE,
    call_sentiment: CALL_SENTIMENT,
    call_recommendation: CALL_RECOMMENDATION,
    call_highlights: CALL_HIGHLIGHTS,
};
