use tracing::warn;

use crate::error::Result;

/// Lifecycle of one table within a page view.
///
/// `Unloaded -> Loading -> {Loaded, LoadFailed}`. A result only settles a
/// `Loading` table. Both end states are final for the page view; records are
/// never replaced once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum TableState<T> {
    Unloaded,
    Loading,
    Loaded(Vec<T>),
    LoadFailed(String),
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<T> TableState<T> {
    pub fn records(&self) -> Option<&[T]> {
        match self {
            Self::Loaded(records) => Some(records.as_slice()),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::LoadFailed(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::LoadFailed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// `Unloaded -> Loading`. Returns false if the state did not change.
    pub fn begin_loading(&mut self) -> bool {
        match self {
            Self::Unloaded => {
                *self = Self::Loading;
                true
            }
            _ => false,
        }
    }

    /// `Loading -> Loaded | LoadFailed`. Returns false, leaving the state
    /// alone, when no load is pending.
    pub fn finish(&mut self, result: Result<Vec<T>>) -> bool {
        match self {
            Self::Loading => {}
            Self::Unloaded => {
                warn!("Ignoring load result for a table that never started loading");
                return false;
            }
            Self::Loaded(_) | Self::LoadFailed(_) => {
                warn!("Ignoring load result for a table that already settled");
                return false;
            }
        }

        *self = match result {
            Ok(records) => Self::Loaded(records),
            Err(e) => Self::LoadFailed(e.to_string()),
        };
        true
    }
}

impl<T> From<Result<Vec<T>>> for TableState<T> {
    fn from(result: Result<Vec<T>>) -> Self {
        let mut state = Self::Loading;
        state.finish(result);
        state
    }
}
