// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Phase-aware room adjacency for doors

use crate::{ElementId, Result, RoomSide};

/// Room adjacency lookup
///
/// A door separates up to two rooms. Which rooms exist depends on the phase
/// being inspected, so every query names the phase.
pub trait AdjacencyQuery {
    /// Room on one side of a door in a given phase
    ///
    /// # Returns
    /// `Ok(None)` when no room exists on that side, `Err` when the host
    /// could not answer the query
    fn adjoining_room(
        &self,
        door: ElementId,
        phase: ElementId,
        side: RoomSide,
    ) -> Result<Option<ElementId>>;

    /// Both sides at once as `(from, to)`
    fn adjoining_rooms(
        &self,
        door: ElementId,
        phase: ElementId,
    ) -> Result<(Option<ElementId>, Option<ElementId>)> {
        let from = self.adjoining_room(door, phase, RoomSide::From)?;
        let to = self.adjoining_room(door, phase, RoomSide::To)?;
        Ok((from, to))
    }
}
