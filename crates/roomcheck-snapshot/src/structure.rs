// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DocumentQuery trait implementation

use crate::records::ViewRecord;
use roomcheck_model::{
    DocumentQuery, ElementId, HostError, LevelInfo, PhaseInfo, Result, ScopeBoxInfo, ViewInfo,
};
use rustc_hash::FxHashMap;

/// Phases, levels, scope boxes and view contents
#[derive(Debug)]
pub struct StructureIndex {
    active_view: ElementId,
    phases: Vec<PhaseInfo>,
    levels: Vec<LevelInfo>,
    level_index: FxHashMap<ElementId, usize>,
    hosted_on: FxHashMap<ElementId, ElementId>,
    scope_boxes: Vec<ScopeBoxInfo>,
    views: Vec<ViewRecord>,
    view_index: FxHashMap<ElementId, usize>,
}

impl StructureIndex {
    pub fn new(
        active_view: ElementId,
        phases: Vec<PhaseInfo>,
        levels: Vec<LevelInfo>,
        scope_boxes: Vec<ScopeBoxInfo>,
        views: Vec<ViewRecord>,
    ) -> Self {
        let level_index = levels
            .iter()
            .enumerate()
            .map(|(i, level)| (level.id, i))
            .collect();
        // First record wins for a repeated view id
        let mut view_index = FxHashMap::default();
        for (i, view) in views.iter().enumerate() {
            view_index.entry(view.id).or_insert(i);
        }
        Self {
            active_view,
            phases,
            levels,
            level_index,
            hosted_on: FxHashMap::default(),
            scope_boxes,
            views,
            view_index,
        }
    }

    /// Switch the active view
    pub fn set_active_view(&mut self, view: ElementId) -> Result<()> {
        if !self.view_index.contains_key(&view) {
            return Err(HostError::ElementNotFound(view));
        }
        self.active_view = view;
        Ok(())
    }

    /// Record the level an element is hosted on
    pub fn set_level(&mut self, element: ElementId, level: ElementId) {
        self.hosted_on.insert(element, level);
    }

    pub fn has_level(&self, id: ElementId) -> bool {
        self.level_index.contains_key(&id)
    }

    pub fn has_phase(&self, id: ElementId) -> bool {
        self.phases.iter().any(|p| p.id == id)
    }

    pub fn has_scope_box(&self, id: ElementId) -> bool {
        self.scope_boxes.iter().any(|sb| sb.id == id)
    }

    /// Views in snapshot order
    pub fn view_records(&self) -> impl Iterator<Item = &ViewRecord> {
        self.views.iter()
    }

    fn view_record(&self, id: ElementId) -> Option<&ViewRecord> {
        self.view_index.get(&id).and_then(|&i| self.views.get(i))
    }
}

impl DocumentQuery for StructureIndex {
    fn phases(&self) -> Vec<PhaseInfo> {
        self.phases.clone()
    }

    fn levels(&self) -> Vec<LevelInfo> {
        self.levels.clone()
    }

    fn level(&self, id: ElementId) -> Option<LevelInfo> {
        self.level_index
            .get(&id)
            .and_then(|&i| self.levels.get(i))
            .cloned()
    }

    fn level_of(&self, element: ElementId) -> Option<ElementId> {
        self.hosted_on.get(&element).copied()
    }

    fn scope_boxes(&self) -> Vec<ScopeBoxInfo> {
        self.scope_boxes.clone()
    }

    fn view(&self, id: ElementId) -> Option<ViewInfo> {
        self.view_record(id).map(|v| ViewInfo {
            id: v.id,
            name: v.name.clone(),
            scope_box: v.scope_box,
        })
    }

    fn active_view(&self) -> ElementId {
        self.active_view
    }

    fn rooms_in_view(&self, view: ElementId) -> Vec<ElementId> {
        self.view_record(view)
            .map(|v| v.rooms.clone())
            .unwrap_or_default()
    }

    fn doors_in_view(&self, view: ElementId) -> Vec<ElementId> {
        self.view_record(view)
            .map(|v| v.doors.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_structure() {
        let structure = StructureIndex::new(ElementId(1), vec![], vec![], vec![], vec![]);
        assert!(structure.phases().is_empty());
        assert!(structure.view(ElementId(1)).is_none());
        assert!(structure.rooms_in_view(ElementId(1)).is_empty());
    }

    #[test]
    fn test_phase_named_is_case_insensitive() {
        let structure = StructureIndex::new(
            ElementId(1),
            vec![
                PhaseInfo {
                    id: ElementId(5),
                    name: "Existing".into(),
                },
                PhaseInfo {
                    id: ElementId(6),
                    name: "New Construction".into(),
                },
            ],
            vec![],
            vec![],
            vec![],
        );
        let names = vec!["new construction".to_string(), "new".to_string()];
        assert_eq!(structure.phase_named(&names).map(|p| p.id), Some(ElementId(6)));
        assert!(structure.phase_named(&["demolition".to_string()]).is_none());
    }
}
