// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized snapshot layout
//!
//! A snapshot is a single JSON object exported from the CAD host. Element
//! references are plain integer ids.

use roomcheck_model::{
    BoundingBox, DocumentMetadata, ElementId, LevelInfo, Location, PhaseInfo, RoomSide,
    ScopeBoxInfo,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters as exported: `null` means present without a value
pub type ParameterMap = BTreeMap<String, serde_json::Value>;

/// Top-level snapshot document
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub metadata: DocumentMetadata,
    /// View the export was taken from
    pub active_view: ElementId,
    #[serde(default)]
    pub phases: Vec<PhaseInfo>,
    #[serde(default)]
    pub levels: Vec<LevelInfo>,
    #[serde(default)]
    pub scope_boxes: Vec<ScopeBoxInfo>,
    #[serde(default)]
    pub views: Vec<ViewRecord>,
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub door_types: Vec<TypeRecord>,
    #[serde(default)]
    pub doors: Vec<DoorRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub scope_box: Option<ElementId>,
    /// Rooms visible in the view
    #[serde(default)]
    pub rooms: Vec<ElementId>,
    /// Doors visible in the view
    #[serde(default)]
    pub doors: Vec<ElementId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: ElementId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<ElementId>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub parameters: ParameterMap,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeRecord {
    pub id: ElementId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: ParameterMap,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoorRecord {
    pub id: ElementId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_id: Option<ElementId>,
    #[serde(default)]
    pub level: Option<ElementId>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub parameters: ParameterMap,
    /// Rooms on either side of the door, per phase
    #[serde(default)]
    pub rooms: Vec<PhaseRooms>,
}

/// Door adjacency in one phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseRooms {
    pub phase: ElementId,
    #[serde(default)]
    pub from: Option<ElementId>,
    #[serde(default)]
    pub to: Option<ElementId>,
}

impl PhaseRooms {
    pub fn side(&self, side: RoomSide) -> Option<ElementId> {
        match side {
            RoomSide::From => self.from,
            RoomSide::To => self.to,
        }
    }
}
