//! Forbidden rectangles for transmitter sites.

use crate::prelude::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct ZoneBounds {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

/// Closed axis-aligned rectangle. Corners are normalized on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneBounds")]
pub struct ExclusionZone {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl From<ZoneBounds> for ExclusionZone {
    fn from(bounds: ZoneBounds) -> Self {
        Self::new(bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max)
    }
}

impl ExclusionZone {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// Inclusive containment: boundary points are inside.
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionZoneSet {
    zones: Vec<ExclusionZone>,
}

impl ExclusionZoneSet {
    pub fn new(zones: Vec<ExclusionZone>) -> Self {
        Self { zones }
    }

    pub fn is_allowed(&self, point: &Coordinate) -> bool {
        !self.zones.iter().any(|zone| zone.contains(point))
    }

    /// Zones of both sets; used to scope global zones onto a tier.
    pub fn union(&self, other: &ExclusionZoneSet) -> ExclusionZoneSet {
        let mut zones = self.zones.clone();
        zones.extend_from_slice(&other.zones);
        Self { zones }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionZone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<ExclusionZone> for ExclusionZoneSet {
    fn from_iter<I: IntoIterator<Item = ExclusionZone>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
