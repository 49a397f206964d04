// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sector resolution
//!
//! Sectors are rectangular plan regions marked by scope boxes named
//! `100_<4 digits>`. An element belongs to the sector whose rectangle
//! contains its reference point; overlaps go to the rectangle with the
//! smallest `(min.x, min.y)`.

use regex::Regex;
use roomcheck_model::{BoundingBox, ElementId, Point, ScopeBoxInfo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Default boundary tolerance in project units
pub const DEFAULT_SECTOR_EPSILON: f64 = 0.01;

static SECTOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"100_([0-9]{4})").expect("sector regex is valid"));

/// Four-digit sector code
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorCode(String);

impl SectorCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract a sector code from a scope box or view name
///
/// Returns the four digits following the first `100_` that is followed by
/// four digits, anywhere in the name.
pub fn parse_sector_code(text: &str) -> Option<SectorCode> {
    SECTOR_PATTERN
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| SectorCode(m.as_str().to_string()))
}

/// A sector with its plan extent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorRegion {
    pub code: SectorCode,
    pub extent: BoundingBox,
    /// Scope box the region came from
    pub source: Option<ElementId>,
}

impl SectorRegion {
    pub fn new(code: SectorCode, extent: BoundingBox) -> Self {
        Self {
            code,
            extent,
            source: None,
        }
    }
}

/// All sectors of a document, loaded once per run
#[derive(Clone, Debug, Default)]
pub struct SectorIndex {
    regions: Vec<SectorRegion>,
    epsilon: f64,
}

impl SectorIndex {
    pub fn new(regions: Vec<SectorRegion>, epsilon: f64) -> Self {
        Self { regions, epsilon }
    }

    /// Build from the document's scope boxes
    ///
    /// Boxes without a sector code in their name, or without a bounding box,
    /// are ignored.
    pub fn from_scope_boxes(boxes: &[ScopeBoxInfo], epsilon: f64) -> Self {
        let mut regions = Vec::with_capacity(boxes.len());
        for sb in boxes {
            let Some(code) = parse_sector_code(&sb.name) else {
                log::debug!("scope box {} '{}' has no sector code", sb.id, sb.name);
                continue;
            };
            let Some(extent) = sb.bounding_box else {
                log::debug!("scope box {} '{}' has no extent", sb.id, sb.name);
                continue;
            };
            regions.push(SectorRegion {
                code,
                extent,
                source: Some(sb.id),
            });
        }
        Self { regions, epsilon }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[SectorRegion] {
        &self.regions
    }

    /// All regions whose epsilon-grown extent contains the point
    pub fn overlapping(&self, point: Option<&Point>) -> Vec<&SectorRegion> {
        let Some(point) = point else {
            return Vec::new();
        };
        self.regions
            .iter()
            .filter(|r| r.extent.contains_xy(point, self.epsilon))
            .collect()
    }

    /// Owning sector for a point
    pub fn resolve(&self, point: Option<&Point>) -> Option<&SectorCode> {
        let mut hits = self.overlapping(point);
        hits.sort_by(|a, b| {
            a.extent
                .min
                .x
                .total_cmp(&b.extent.min.x)
                .then(a.extent.min.y.total_cmp(&b.extent.min.y))
        });
        hits.first().map(|r| &r.code)
    }
}
