use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, RestaurantRecord};

/// One map pin plus the popup data shown for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub restaurant_id: String,
    pub name: String,
    pub cuisine_keywords: Vec<String>,
    pub position: Coordinates,
    pub selected: bool,
}

/// Axis-aligned box around a set of points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Coordinates>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Bounds {
                    south: point.latitude,
                    west: point.longitude,
                    north: point.latitude,
                    east: point.longitude,
                },
                Some(b) => Bounds {
                    south: b.south.min(point.latitude),
                    west: b.west.min(point.longitude),
                    north: b.north.max(point.latitude),
                    east: b.east.max(point.longitude),
                },
            })
        })
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// Visible map area. `bounds` is `None` until markers have been fitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: u8,
    pub bounds: Option<Bounds>,
}

impl MapViewport {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            bounds: None,
        }
    }

    /// Fit to the markers. Zero markers leave the viewport unchanged.
    pub fn fit(&mut self, markers: &[Marker]) -> bool {
        match Bounds::around(markers.iter().map(|m| &m.position)) {
            Some(bounds) => {
                self.bounds = Some(bounds);
                true
            }
            None => false,
        }
    }
}

/// Markers for every match that has coordinates, in match order.
pub fn build_markers(matches: &[&RestaurantRecord], selected_id: Option<&str>) -> Vec<Marker> {
    matches
        .iter()
        .filter_map(|record| {
            let position = record.coordinates?;
            Some(Marker {
                restaurant_id: record.id.clone(),
                name: record.display_name().to_string(),
                cuisine_keywords: record.cuisine_keywords.clone(),
                position,
                selected: selected_id == Some(record.id.as_str()),
            })
        })
        .collect()
}

/// Markers currently on the map.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Swap in a new marker set, returning how many were retracted.
    pub fn replace(&mut self, markers: Vec<Marker>) -> usize {
        let retracted = self.markers.len();
        self.markers = markers;
        retracted
    }
}
