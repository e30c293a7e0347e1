use serde::{Deserialize, Serialize};

use super::ChainStatus;

/// Chain filter selection. Compared against the canonical
/// [`ChainStatus`], never against raw source strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChainFilter {
    Yes,
    No,
}

impl ChainFilter {
    pub fn matches(&self, status: ChainStatus) -> bool {
        matches!(
            (self, status),
            (ChainFilter::Yes, ChainStatus::Yes) | (ChainFilter::No, ChainStatus::No)
        )
    }
}

impl std::fmt::Display for ChainFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

impl std::str::FromStr for ChainFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ChainStatus::from_raw(s) {
            ChainStatus::Yes => Ok(Self::Yes),
            ChainStatus::No => Ok(Self::No),
            ChainStatus::Unknown => Err(format!("Invalid chain filter: {s}")),
        }
    }
}

/// Active filter values. Absent, empty and whitespace-only fields do not
/// constrain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    pub cuisine: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub chain: Option<ChainFilter>,
    pub keyword: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn with_chain(mut self, chain: ChainFilter) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn cuisine(&self) -> Option<&str> {
        active(&self.cuisine)
    }

    pub fn city(&self) -> Option<&str> {
        active(&self.city)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        active(&self.neighborhood)
    }

    pub fn keyword(&self) -> Option<&str> {
        active(&self.keyword)
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.cuisine().is_none()
            && self.city().is_none()
            && self.neighborhood().is_none()
            && self.chain.is_none()
            && self.keyword().is_none()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Columns that back a selection control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FacetColumn {
    Cuisine,
    City,
    Neighborhood,
    Chain,
}

impl FacetColumn {
    pub const ALL: [FacetColumn; 4] = [
        FacetColumn::Cuisine,
        FacetColumn::City,
        FacetColumn::Neighborhood,
        FacetColumn::Chain,
    ];
}

impl std::fmt::Display for FacetColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cuisine => write!(f, "cuisine"),
            Self::City => write!(f, "city"),
            Self::Neighborhood => write!(f, "neighborhood"),
            Self::Chain => write!(f, "chain"),
        }
    }
}

impl std::str::FromStr for FacetColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cuisine" | "cuisinekeywords" | "cuisine_keywords" => Ok(Self::Cuisine),
            "city" => Ok(Self::City),
            "neighborhood" => Ok(Self::Neighborhood),
            "chain" => Ok(Self::Chain),
            _ => Err(format!("Unknown facet column: {s}")),
        }
    }
}
