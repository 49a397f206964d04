// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeometryQuery trait implementation

use roomcheck_model::{BoundingBox, ElementId, GeometryQuery, Location};
use rustc_hash::FxHashMap;

/// Bounding boxes and placements keyed by element
#[derive(Debug, Default)]
pub struct GeometryStore {
    boxes: FxHashMap<ElementId, BoundingBox>,
    locations: FxHashMap<ElementId, Location>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: ElementId,
        bounding_box: Option<BoundingBox>,
        location: Option<Location>,
    ) {
        if let Some(bb) = bounding_box {
            self.boxes.insert(id, bb);
        }
        if let Some(loc) = location {
            self.locations.insert(id, loc);
        }
    }
}

impl GeometryQuery for GeometryStore {
    fn bounding_box(&self, id: ElementId) -> Option<BoundingBox> {
        self.boxes.get(&id).copied()
    }

    fn location(&self, id: ElementId) -> Option<Location> {
        self.locations.get(&id).copied()
    }
}
