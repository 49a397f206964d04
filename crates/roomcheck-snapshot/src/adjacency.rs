// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! AdjacencyQuery trait implementation

use crate::records::PhaseRooms;
use roomcheck_model::{AdjacencyQuery, ElementId, HostError, Result, RoomSide};
use rustc_hash::FxHashMap;

/// Door -> (phase -> from/to rooms)
#[derive(Debug, Default)]
pub struct AdjacencyStore {
    doors: FxHashMap<ElementId, Vec<PhaseRooms>>,
}

impl AdjacencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, door: ElementId, rooms: Vec<PhaseRooms>) {
        self.doors.insert(door, rooms);
    }
}

impl AdjacencyQuery for AdjacencyStore {
    fn adjoining_room(
        &self,
        door: ElementId,
        phase: ElementId,
        side: RoomSide,
    ) -> Result<Option<ElementId>> {
        let phases = self
            .doors
            .get(&door)
            .ok_or_else(|| HostError::adjacency(door, "element is not a door"))?;
        Ok(phases
            .iter()
            .find(|p| p.phase == phase)
            .and_then(|p| p.side(side)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_scoped_lookup() {
        let mut store = AdjacencyStore::new();
        store.insert(
            ElementId(10),
            vec![
                PhaseRooms {
                    phase: ElementId(1),
                    from: Some(ElementId(100)),
                    to: None,
                },
                PhaseRooms {
                    phase: ElementId(2),
                    from: Some(ElementId(100)),
                    to: Some(ElementId(101)),
                },
            ],
        );

        let (from, to) = store.adjoining_rooms(ElementId(10), ElementId(1)).unwrap();
        assert_eq!(from, Some(ElementId(100)));
        assert_eq!(to, None);

        let to = store
            .adjoining_room(ElementId(10), ElementId(2), RoomSide::To)
            .unwrap();
        assert_eq!(to, Some(ElementId(101)));

        // Unknown phase: no rooms on either side
        let (from, to) = store.adjoining_rooms(ElementId(10), ElementId(3)).unwrap();
        assert!(from.is_none() && to.is_none());

        assert!(store
            .adjoining_room(ElementId(11), ElementId(1), RoomSide::From)
            .is_err());
    }
}
