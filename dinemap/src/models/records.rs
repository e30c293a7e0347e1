use serde::{Deserialize, Serialize};

use super::ChainStatus;

/// A validated latitude/longitude pair. Never partially populated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` unless both components are finite and in range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::source::parse_coordinates(s).ok_or_else(|| format!("Invalid coordinates: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CuisineRecord {
    pub id: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantRecord {
    pub id: String,
    pub name: String,
    pub cuisine_keywords: Vec<String>,
    pub chain: ChainStatus,
    pub city: String,
    pub neighborhood: String,
    pub address: String,
    pub profile_image_url: String,
    pub maps_link: String,
    pub coordinates: Option<Coordinates>,
    pub operational: bool,
}

impl RestaurantRecord {
    /// Name shown on tiles and searched by keyword. Schemas without a
    /// separate name column fall back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Exact token membership; `"Tacos"` does not match `"Street Tacos"`.
    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        let wanted = cuisine.trim();
        self.cuisine_keywords.iter().any(|token| token == wanted)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub restaurant_id: String,
    pub date: String,
    pub sentiment: String,
    pub recommendation: String,
    pub highlights: String,
}
