use serde::{Deserialize, Serialize};

/// One of the three tables a directory page can load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Cuisine,
    Restaurant,
    Call,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Cuisine, TableKind::Restaurant, TableKind::Call];
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cuisine => write!(f, "cuisine"),
            Self::Restaurant => write!(f, "restaurant"),
            Self::Call => write!(f, "call"),
        }
    }
}

impl std::str::FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cuisine" | "cuisines" => Ok(Self::Cuisine),
            "restaurant" | "restaurants" => Ok(Self::Restaurant),
            "call" | "calls" => Ok(Self::Call),
            _ => Err(format!("Unknown table: {s}")),
        }
    }
}

/// Canonical chain category. Source revisions spell it `Y`/`N` or
/// `Yes`/`No`; everything else collapses to `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl ChainStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Self::Yes,
            "n" | "no" | "false" | "0" => Self::No,
            _ => Self::Unknown,
        }
    }

    /// Label used for facet options; `None` for `Unknown`.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Yes => Some("Yes"),
            Self::No => Some("No"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
