// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation run
//!
//! A run loads the lookup tables once, finds the validation phase, indexes
//! the sectors and checks the rooms and doors of one view.

use crate::config::{TableFiles, ValidatorConfig};
use crate::doors::DoorValidator;
use crate::function::{FunctionTable, ValidationMode};
use crate::level::LevelCodeTable;
use crate::report::{Section, TableSummary, ValidationReport};
use crate::rooms::RoomValidator;
use crate::sector::{parse_sector_code, SectorCode, SectorIndex};
use crate::tables::{
    read_door_direction_rules, read_function_map, read_level_map, DoorDirectionRules,
    JsonTableFile, TableSource,
};
use crate::{Error, Result};
use roomcheck_model::{DocumentQuery, ElementId, HostDocument, ViewInfo};
use std::path::Path;

/// Lookup tables of one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigTables {
    pub door_rules: DoorDirectionRules,
    pub functions: FunctionTable,
    pub levels: LevelCodeTable,
}

impl ConfigTables {
    /// Tables with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the three tables from JSON workbooks in `dir`
    ///
    /// Missing files load as empty tables.
    pub fn load(dir: &Path, files: &TableFiles) -> Result<Self> {
        Self::from_sources(
            &JsonTableFile::new(dir.join(&files.door_direction_rules)),
            &JsonTableFile::new(dir.join(&files.function_map)),
            &JsonTableFile::new(dir.join(&files.level_map)),
        )
    }

    pub fn from_sources(
        door_rules: &dyn TableSource,
        functions: &dyn TableSource,
        levels: &dyn TableSource,
    ) -> Result<Self> {
        let tables = Self {
            door_rules: read_door_direction_rules(&door_rules.read_table()?),
            functions: read_function_map(&functions.read_table()?),
            levels: read_level_map(&levels.read_table()?),
        };
        log::info!(
            "tables loaded: {} door rules, {} functions, {} levels",
            tables.door_rules.len(),
            tables.functions.len(),
            tables.levels.len()
        );
        Ok(tables)
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            door_rules: self.door_rules.len(),
            function_entries: self.functions.len(),
            level_entries: self.levels.len(),
        }
    }
}

/// Sector a view is responsible for
///
/// Taken from the name of the view's scope box, or from the view name when
/// the scope box carries no sector code.
pub fn view_sector(query: &dyn DocumentQuery, view: &ViewInfo) -> Option<SectorCode> {
    view.scope_box
        .and_then(|id| query.scope_boxes().into_iter().find(|sb| sb.id == id))
        .and_then(|sb| parse_sector_code(&sb.name))
        .or_else(|| parse_sector_code(&view.name))
}

/// One validation run over a host document
pub struct Validator<'a> {
    doc: &'a dyn HostDocument,
    config: &'a ValidatorConfig,
    tables: &'a ConfigTables,
    mode: ValidationMode,
}

impl<'a> Validator<'a> {
    pub fn new(
        doc: &'a dyn HostDocument,
        config: &'a ValidatorConfig,
        tables: &'a ConfigTables,
        mode: ValidationMode,
    ) -> Self {
        Self {
            doc,
            config,
            tables,
            mode,
        }
    }

    /// Validate the document's active view
    pub fn run(&self) -> Result<ValidationReport> {
        self.run_view(self.doc.query().active_view())
    }

    /// Validate one view
    ///
    /// # Errors
    /// Fails when no configured phase exists or the view is unknown.
    /// Problems with single rooms or doors are reported, never returned.
    pub fn run_view(&self, view_id: ElementId) -> Result<ValidationReport> {
        let query = self.doc.query();
        let phase = query
            .phase_named(&self.config.phase_names)
            .ok_or_else(|| Error::PhaseNotFound(self.config.phase_names.clone()))?;
        let view = query.view(view_id).ok_or(Error::ViewNotFound(view_id))?;

        let sectors = SectorIndex::from_scope_boxes(&query.scope_boxes(), self.config.sector_epsilon);
        log::info!(
            "validating view '{}' in phase '{}' ({} sectors, mode {})",
            view.name,
            phase.name,
            sectors.len(),
            self.mode
        );
        let sector = view_sector(query, &view);
        if sector.is_none() {
            log::warn!("could not determine sector code for view '{}'", view.name);
        }

        let rooms = query.rooms_in_view(view.id);
        let rooms = match &sector {
            _ if rooms.is_empty() => Section::empty("rooms"),
            None => Section::no_view_sector("Could not determine sector code for this view."),
            Some(sector) => RoomValidator::new(
                self.doc,
                self.config,
                &self.tables.functions,
                &self.tables.levels,
                &sectors,
                self.mode,
            )
            .validate(&rooms, sector),
        };

        let doors = query.doors_in_view(view.id);
        let doors = match &sector {
            _ if doors.is_empty() => Section::empty("doors"),
            None => {
                Section::no_view_sector("Could not determine sector code for this view (doors).")
            }
            Some(sector) => DoorValidator::new(self.doc, self.config, &sectors, phase.id)
                .validate(&doors, sector),
        };

        Ok(ValidationReport {
            tables: self.tables.summary(),
            mode: self.mode,
            phase,
            scope_boxes_loaded: sectors.len(),
            view_name: view.name,
            rooms,
            doors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{parse_json_table, Table};
    use roomcheck_model::{LevelInfo, PhaseInfo, ScopeBoxInfo};

    struct Inline(&'static str);

    impl TableSource for Inline {
        fn name(&self) -> String {
            "inline".to_string()
        }

        fn read_table(&self) -> Result<Table> {
            parse_json_table(self.0).map_err(|e| Error::table(self.name(), e.to_string()))
        }
    }

    struct Views {
        boxes: Vec<ScopeBoxInfo>,
    }

    impl DocumentQuery for Views {
        fn phases(&self) -> Vec<PhaseInfo> {
            Vec::new()
        }
        fn levels(&self) -> Vec<LevelInfo> {
            Vec::new()
        }
        fn level(&self, _id: ElementId) -> Option<LevelInfo> {
            None
        }
        fn level_of(&self, _element: ElementId) -> Option<ElementId> {
            None
        }
        fn scope_boxes(&self) -> Vec<ScopeBoxInfo> {
            self.boxes.clone()
        }
        fn view(&self, _id: ElementId) -> Option<ViewInfo> {
            None
        }
        fn active_view(&self) -> ElementId {
            ElementId(0)
        }
        fn rooms_in_view(&self, _view: ElementId) -> Vec<ElementId> {
            Vec::new()
        }
        fn doors_in_view(&self, _view: ElementId) -> Vec<ElementId> {
            Vec::new()
        }
    }

    fn view(name: &str, scope_box: Option<i64>) -> ViewInfo {
        ViewInfo {
            id: ElementId(900),
            name: name.to_string(),
            scope_box: scope_box.map(ElementId),
        }
    }

    #[test]
    fn test_view_sector_sources() {
        let query = Views {
            boxes: vec![
                ScopeBoxInfo {
                    id: ElementId(1),
                    name: "100_2002".into(),
                    bounding_box: None,
                },
                ScopeBoxInfo {
                    id: ElementId(2),
                    name: "Overall".into(),
                    bounding_box: None,
                },
            ],
        };
        let code = |v: ViewInfo| view_sector(&query, &v).map(|c| c.to_string());

        assert_eq!(code(view("L2 100_1001", Some(1))).as_deref(), Some("2002"));
        assert_eq!(code(view("L2 100_1001", Some(2))).as_deref(), Some("1001"));
        assert_eq!(code(view("L2 100_1001", None)).as_deref(), Some("1001"));
        assert_eq!(code(view("L2 Overall", Some(2))), None);
    }

    #[test]
    fn test_tables_from_sources() {
        let tables = ConfigTables::from_sources(
            &Inline(r#"[["A", "B", "C"], ["x", "y", "z"]]"#),
            &Inline(r#"[["GIFA NAME", "FUNCTION ID"], ["Office", 1]]"#),
            &Inline(r#"[["ELEVATION", "CODE"], [0, "L1"], [6000, "L2"]]"#),
        )
        .unwrap();
        assert_eq!(
            tables.summary(),
            TableSummary {
                door_rules: 3,
                function_entries: 1,
                level_entries: 2,
            }
        );
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        let result = ConfigTables::from_sources(&Inline("[]"), &Inline("{"), &Inline("[]"));
        assert!(matches!(result, Err(Error::Table { .. })));
    }

    #[test]
    fn test_missing_directory_loads_empty_tables() {
        let tables = ConfigTables::load(
            Path::new("/nonexistent/roomcheck-config"),
            &TableFiles::default(),
        )
        .unwrap();
        assert_eq!(tables, ConfigTables::empty());
    }
}
