// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry queries for placing elements on the plan

use crate::{BoundingBox, ElementId, Location, Point};

/// Geometry source
///
/// Provides the host-computed extents and placements the numbering rules
/// need. Nothing here is tessellated; only boxes and points are exposed.
pub trait GeometryQuery {
    /// Model-space bounding box of an element
    fn bounding_box(&self, id: ElementId) -> Option<BoundingBox>;

    /// Placement of an element
    fn location(&self, id: ElementId) -> Option<Location>;

    /// Centre of the bounding box on the XY plane
    fn bounding_box_center(&self, id: ElementId) -> Option<Point> {
        self.bounding_box(id).map(|bb| bb.center_xy())
    }
}
