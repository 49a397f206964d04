// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for building document data
//!
//! Coordinates and elevations are expressed in project length units. The
//! document metadata carries the size of one project unit in millimetres.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimetres per foot, the internal length unit of most CAD hosts
pub const MM_PER_FOOT: f64 = 304.8;

/// Type-safe element identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(id: i64) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for i64 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// A point in project coordinates
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the XY plane
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }
}

impl From<[f64; 3]> for Point {
    fn from(v: [f64; 3]) -> Self {
        Point::new(v[0], v[1], v[2])
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Centre of the box projected to the XY plane (z = 0)
    pub fn center_xy(&self) -> Point {
        Point::xy((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    /// Check whether the XY extent, grown by `eps` on every side, contains `point`
    pub fn contains_xy(&self, point: &Point, eps: f64) -> bool {
        (self.min.x - eps) <= point.x
            && point.x <= (self.max.x + eps)
            && (self.min.y - eps) <= point.y
            && point.y <= (self.max.y + eps)
    }
}

/// Placement of an element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Point-based placement (rooms, most door families)
    Point(Point),
    /// Line-based placement
    Curve { start: Point, end: Point },
}

impl Location {
    /// Representative point: the point itself, or the curve evaluated at
    /// normalized parameter 0.5
    pub fn reference_point(&self) -> Point {
        match self {
            Location::Point(p) => *p,
            Location::Curve { start, end } => start.midpoint(end),
        }
    }
}

/// Which side of a door to look up a room on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSide {
    From,
    To,
}

impl fmt::Display for RoomSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomSide::From => f.write_str("from"),
            RoomSide::To => f.write_str("to"),
        }
    }
}

/// Building level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub id: ElementId,
    pub name: String,
    /// Elevation in project units
    pub elevation: f64,
}

impl LevelInfo {
    pub fn new(id: ElementId, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
        }
    }
}

/// Construction phase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub id: ElementId,
    pub name: String,
}

/// Named region marker (scope box)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeBoxInfo {
    pub id: ElementId,
    pub name: String,
    pub bounding_box: Option<BoundingBox>,
}

/// Plan view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewInfo {
    pub id: ElementId,
    pub name: String,
    /// Scope box assigned to the view, if any
    pub scope_box: Option<ElementId>,
}

/// Document metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Size of one project length unit in millimetres
    #[serde(default = "default_length_unit_mm")]
    pub length_unit_mm: f64,
}

fn default_length_unit_mm() -> f64 {
    MM_PER_FOOT
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            length_unit_mm: MM_PER_FOOT,
        }
    }
}

impl DocumentMetadata {
    /// Convert a length in project units to millimetres
    pub fn to_mm(&self, value: f64) -> f64 {
        value * self.length_unit_mm
    }

    /// Convert a length in millimetres to project units
    pub fn from_mm(&self, mm: f64) -> f64 {
        mm / self.length_unit_mm
    }
}
