// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DocumentSnapshot - HostDocument implementation over an exported snapshot

use crate::adjacency::AdjacencyStore;
use crate::geometry::GeometryStore;
use crate::parameters::ParameterStore;
use crate::records::SnapshotFile;
use crate::structure::StructureIndex;

use roomcheck_model::{
    AdjacencyQuery, DocumentMetadata, DocumentQuery, ElementId, GeometryQuery, HostDocument,
    HostError, ParameterReader, Result,
};

/// Snapshot of a building document implementing the `HostDocument` trait
#[derive(Debug)]
pub struct DocumentSnapshot {
    parameters: ParameterStore,
    geometry: GeometryStore,
    adjacency: AdjacencyStore,
    structure: StructureIndex,
    metadata: DocumentMetadata,
}

impl DocumentSnapshot {
    /// Parse snapshot JSON and build the indexes
    pub fn parse(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content)
            .map_err(|e| HostError::invalid(format!("malformed snapshot: {e}")))?;
        Self::from_file(file)
    }

    /// Build indexes from an already deserialized snapshot
    pub fn from_file(file: SnapshotFile) -> Result<Self> {
        if file.metadata.length_unit_mm <= 0.0 || !file.metadata.length_unit_mm.is_finite() {
            return Err(HostError::invalid(format!(
                "length_unit_mm must be positive, got {}",
                file.metadata.length_unit_mm
            )));
        }

        let mut parameters = ParameterStore::new();
        let mut geometry = GeometryStore::new();
        let mut adjacency = AdjacencyStore::new();
        let mut structure = StructureIndex::new(
            file.active_view,
            file.phases,
            file.levels,
            file.scope_boxes.clone(),
            file.views,
        );

        if structure.view(file.active_view).is_none() {
            return Err(HostError::invalid(format!(
                "active view {} is not in the snapshot",
                file.active_view
            )));
        }

        for sb in &file.scope_boxes {
            parameters.insert(sb.id, Some(sb.name.clone()), None, &Default::default())?;
            geometry.insert(sb.id, sb.bounding_box, None);
        }

        for door_type in &file.door_types {
            parameters.insert(door_type.id, door_type.name.clone(), None, &door_type.parameters)?;
        }

        for room in &file.rooms {
            parameters.insert(room.id, room.name.clone(), None, &room.parameters)?;
            geometry.insert(room.id, room.bounding_box, room.location);
            if let Some(level) = room.level {
                if !structure.has_level(level) {
                    return Err(HostError::invalid(format!(
                        "room {} references unknown level {level}",
                        room.id
                    )));
                }
                structure.set_level(room.id, level);
            }
        }

        for door in file.doors {
            if let Some(type_id) = door.type_id {
                if !parameters.contains(type_id) {
                    return Err(HostError::invalid(format!(
                        "door {} references unknown type {type_id}",
                        door.id
                    )));
                }
            }
            for entry in &door.rooms {
                if !structure.has_phase(entry.phase) {
                    return Err(HostError::invalid(format!(
                        "door {} references unknown phase {}",
                        door.id, entry.phase
                    )));
                }
                for room in [entry.from, entry.to].into_iter().flatten() {
                    if !parameters.contains(room) {
                        return Err(HostError::invalid(format!(
                            "door {} references unknown room {room}",
                            door.id
                        )));
                    }
                }
            }
            parameters.insert(door.id, door.name.clone(), door.type_id, &door.parameters)?;
            geometry.insert(door.id, door.bounding_box, door.location);
            if let Some(level) = door.level {
                if !structure.has_level(level) {
                    return Err(HostError::invalid(format!(
                        "door {} references unknown level {level}",
                        door.id
                    )));
                }
                structure.set_level(door.id, level);
            }
            adjacency.insert(door.id, door.rooms);
        }

        for view in structure.view_records() {
            if let Some(sb) = view.scope_box {
                if !structure.has_scope_box(sb) {
                    return Err(HostError::invalid(format!(
                        "view '{}' references unknown scope box {sb}",
                        view.name
                    )));
                }
            }
            if let Some(missing) = view
                .rooms
                .iter()
                .chain(view.doors.iter())
                .find(|id| !parameters.contains(**id))
            {
                return Err(HostError::invalid(format!(
                    "view '{}' lists unknown element {missing}",
                    view.name
                )));
            }
        }

        log::debug!(
            "snapshot loaded: {} levels, {} scope boxes, {} rooms in active view",
            structure.levels().len(),
            structure.scope_boxes().len(),
            structure.rooms_in_view(file.active_view).len()
        );

        Ok(Self {
            parameters,
            geometry,
            adjacency,
            structure,
            metadata: file.metadata,
        })
    }

    /// Point the snapshot at a different view
    pub fn with_active_view(mut self, view: ElementId) -> Result<Self> {
        self.structure.set_active_view(view)?;
        Ok(self)
    }

    /// Find a view by exact name
    pub fn view_named(&self, name: &str) -> Option<ElementId> {
        self.structure
            .view_records()
            .find(|v| v.name == name)
            .map(|v| v.id)
    }
}

impl HostDocument for DocumentSnapshot {
    fn parameters(&self) -> &dyn ParameterReader {
        &self.parameters
    }

    fn geometry(&self) -> &dyn GeometryQuery {
        &self.geometry
    }

    fn adjacency(&self) -> &dyn AdjacencyQuery {
        &self.adjacency
    }

    fn query(&self) -> &dyn DocumentQuery {
        &self.structure
    }

    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }
}
