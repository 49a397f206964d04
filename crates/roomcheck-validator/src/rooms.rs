// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room numbering validation
//!
//! Rooms of the view's sector are grouped by `(sector, function id)`. Each
//! group is ordered right to left in bands of near-equal X, top to bottom
//! within a band, and numbered from 1. The expected number of a room is
//! `{level}-{sector}-{function id}{sequence:02}`, the function id padded to
//! the configured width.

use crate::config::ValidatorConfig;
use crate::function::{AreaCategory, AreaClassifier, FunctionId, FunctionTable, ValidationMode};
use crate::level::{LevelCode, LevelCodeTable};
use crate::placement::{room_order_point, room_sector_point};
use crate::report::{
    ElementIssue, IssueKind, Note, Outcome, OutcomeStatus, Section, SkipReason,
};
use crate::sector::{SectorCode, SectorIndex};
use roomcheck_model::{ElementId, HostDocument, Point};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Result of checking one room
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoomOutcome {
    Valid {
        room: ElementId,
        name: String,
        category: AreaCategory,
        number: String,
    },
    Mismatch {
        room: ElementId,
        name: String,
        category: AreaCategory,
        expected: String,
        found: String,
    },
    Skipped {
        room: ElementId,
        reason: SkipReason,
    },
    Failed(ElementIssue),
}

impl Outcome for RoomOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            RoomOutcome::Valid { .. } => OutcomeStatus::Valid,
            RoomOutcome::Mismatch { .. } | RoomOutcome::Failed(_) => OutcomeStatus::Issue,
            RoomOutcome::Skipped { .. } => OutcomeStatus::Skipped,
        }
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomOutcome::Valid {
                room,
                name,
                category,
                ..
            } => writeln!(f, "• Room [{room}] '{name}' [{category}] OK"),
            RoomOutcome::Mismatch {
                room,
                name,
                category,
                expected,
                found,
            } => writeln!(
                f,
                "• Room [{room}] '{name}' [{category}] Expected `{expected}` | Found `{found}`"
            ),
            RoomOutcome::Failed(issue) => writeln!(f, "- {issue}"),
            RoomOutcome::Skipped { .. } => Ok(()),
        }
    }
}

/// A room that passed all filters and waits to be numbered
#[derive(Clone, Debug, PartialEq)]
pub struct RoomCandidate {
    pub room: ElementId,
    pub name: String,
    pub number: String,
    pub function_id: Option<FunctionId>,
    pub category: AreaCategory,
    pub level_code: LevelCode,
    pub sector: SectorCode,
    pub point: Point,
}

/// Outcome of the per-room collection pass
enum Collected {
    Candidate(RoomCandidate),
    Done(RoomOutcome),
}

/// Expected room number for a position in its group
///
/// A missing function id is written as 0.
pub fn expected_room_number(
    level_code: &str,
    sector: &SectorCode,
    function_id: Option<FunctionId>,
    function_id_digits: usize,
    sequence: usize,
) -> String {
    format!(
        "{level_code}-{sector}-{:0width$}{sequence:02}",
        function_id.unwrap_or(0),
        width = function_id_digits
    )
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Order items right to left in X bands, top to bottom within a band
///
/// Items are stably sorted by descending X. A new band starts whenever an
/// item's X differs from the previous item's X by more than `tolerance`.
/// Each band is then stably sorted by descending Y and the bands are
/// concatenated in order.
pub fn order_by_bands<T>(mut items: Vec<T>, point: impl Fn(&T) -> Point, tolerance: f64) -> Vec<T> {
    items.sort_by(|a, b| descending(point(a).x, point(b).x));

    let mut bands: Vec<Vec<T>> = Vec::new();
    let mut last_x: Option<f64> = None;
    for item in items {
        let x = point(&item).x;
        match (last_x, bands.last_mut()) {
            (Some(prev), Some(band)) if (x - prev).abs() <= tolerance => band.push(item),
            _ => bands.push(vec![item]),
        }
        last_x = Some(x);
    }

    bands
        .into_iter()
        .flat_map(|mut band| {
            band.sort_by(|a, b| descending(point(a).y, point(b).y));
            band
        })
        .collect()
}

/// Room numbering validator for one view
pub struct RoomValidator<'a> {
    doc: &'a dyn HostDocument,
    config: &'a ValidatorConfig,
    functions: &'a FunctionTable,
    levels: &'a LevelCodeTable,
    sectors: &'a SectorIndex,
    classifier: AreaClassifier,
    mode: ValidationMode,
}

impl<'a> RoomValidator<'a> {
    pub fn new(
        doc: &'a dyn HostDocument,
        config: &'a ValidatorConfig,
        functions: &'a FunctionTable,
        levels: &'a LevelCodeTable,
        sectors: &'a SectorIndex,
        mode: ValidationMode,
    ) -> Self {
        Self {
            doc,
            config,
            functions,
            levels,
            sectors,
            classifier: config.classifier(),
            mode,
        }
    }

    /// Band tolerance in project units
    pub fn band_tolerance(&self) -> f64 {
        self.doc.metadata().from_mm(self.config.band_tolerance_mm)
    }

    /// Validate the rooms of a view owned by `view_sector`
    pub fn validate(&self, rooms: &[ElementId], view_sector: &SectorCode) -> Section<RoomOutcome> {
        let mut notes = Vec::new();
        let mut outcomes = Vec::new();
        let mut groups: Vec<Vec<RoomCandidate>> = Vec::new();
        let mut group_index: FxHashMap<(SectorCode, Option<FunctionId>), usize> =
            FxHashMap::default();

        for &room in rooms {
            match self.collect(room, view_sector, &mut notes) {
                Collected::Candidate(candidate) => {
                    let key = (candidate.sector.clone(), candidate.function_id);
                    let slot = *group_index.entry(key).or_insert_with(|| {
                        groups.push(Vec::new());
                        groups.len() - 1
                    });
                    groups[slot].push(candidate);
                }
                Collected::Done(outcome) => outcomes.push(outcome),
            }
        }

        let tolerance = self.band_tolerance();
        let digits = self.config.function_id_digits;
        for group in groups {
            let ordered = order_by_bands(group, |c| c.point, tolerance);
            for (idx, candidate) in ordered.into_iter().enumerate() {
                outcomes.push(number_check(candidate, digits, idx + 1));
            }
        }

        Section::checked(view_sector.clone(), notes, outcomes)
    }

    fn collect(&self, room: ElementId, view_sector: &SectorCode, notes: &mut Vec<Note>) -> Collected {
        match self.try_collect(room, view_sector, notes) {
            Ok(collected) => collected,
            Err(e) => {
                log::debug!("room {room}: {e}");
                Collected::Done(RoomOutcome::Failed(ElementIssue::new(
                    room,
                    IssueKind::Host,
                    format!("Error validating Room [{room}]: {e}"),
                )))
            }
        }
    }

    fn try_collect(
        &self,
        room: ElementId,
        view_sector: &SectorCode,
        notes: &mut Vec<Note>,
    ) -> roomcheck_model::Result<Collected> {
        let params = self.doc.parameters();
        let names = &self.config.parameters;

        let name = params.parameter(room, &names.room_name)?;
        let number = params.parameter(room, &names.room_number)?;
        let function = params.parameter(room, &names.room_function)?;
        let (Some(name), Some(number), Some(function)) = (name, number, function) else {
            return Ok(failed(
                room,
                IssueKind::MissingParameter,
                format!(
                    "Room [{room}] is missing one of the parameters {}, {}, {}.",
                    names.room_name, names.room_number, names.room_function
                ),
            ));
        };
        let name = name.as_str().trim().to_string();
        let number = number.as_str().trim().to_string();
        let function_name = function.as_str().trim().to_uppercase();

        let function_id =
            self.functions
                .function_id(&function_name, &number, self.config.function_id_digits);
        let category = self.classifier.classify(function_id);
        if !self.mode.accepts(category) {
            return Ok(skipped(room, SkipReason::FilteredByMode));
        }

        let query = self.doc.query();
        let Some(level) = query.level_of(room).and_then(|id| query.level(id)) else {
            return Ok(failed(
                room,
                IssueKind::MissingLevel,
                format!("Room [{room}] '{name}' is not placed on a level."),
            ));
        };
        let level_code = self
            .levels
            .resolve(Some(&level), self.doc.metadata().length_unit_mm);
        if !level_code.is_known() {
            let note = Note::Info(format!(
                "Level mapping error for `{}`: no level code matches",
                level.name
            ));
            if !notes.contains(&note) {
                notes.push(note);
            }
        }

        let geometry = self.doc.geometry();
        let Some(sector) = self
            .sectors
            .resolve(room_sector_point(geometry, room).as_ref())
            .cloned()
        else {
            return Ok(failed(
                room,
                IssueKind::NoSector,
                format!("Room [{room}] '{name}' could not resolve sector."),
            ));
        };
        if sector != *view_sector {
            return Ok(skipped(room, SkipReason::OtherSector(sector)));
        }

        let Some(point) = room_order_point(geometry, room) else {
            return Ok(skipped(room, SkipReason::NoPlacement));
        };

        Ok(Collected::Candidate(RoomCandidate {
            room,
            name,
            number,
            function_id,
            category,
            level_code,
            sector,
            point,
        }))
    }
}

fn failed(room: ElementId, kind: IssueKind, message: String) -> Collected {
    Collected::Done(RoomOutcome::Failed(ElementIssue::new(room, kind, message)))
}

fn skipped(room: ElementId, reason: SkipReason) -> Collected {
    Collected::Done(RoomOutcome::Skipped { room, reason })
}

fn number_check(candidate: RoomCandidate, digits: usize, sequence: usize) -> RoomOutcome {
    let expected = expected_room_number(
        &candidate.level_code.code,
        &candidate.sector,
        candidate.function_id,
        digits,
        sequence,
    );
    if candidate.number == expected {
        RoomOutcome::Valid {
            room: candidate.room,
            name: candidate.name,
            category: candidate.category,
            number: candidate.number,
        }
    } else {
        RoomOutcome::Mismatch {
            room: candidate.room,
            name: candidate.name,
            category: candidate.category,
            expected,
            found: candidate.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::parse_sector_code;

    fn sector() -> SectorCode {
        parse_sector_code("100_1001").unwrap()
    }

    #[test]
    fn test_expected_room_number() {
        assert_eq!(
            expected_room_number("L2", &sector(), Some(1), 2, 3),
            "L2-1001-0103"
        );
        assert_eq!(expected_room_number("L2", &sector(), None, 2, 12), "L2-1001-0012");
        assert_eq!(expected_room_number("L2", &sector(), Some(12), 2, 1), "L2-1001-1201");
        assert_eq!(
            expected_room_number("???", &sector(), Some(2), 1, 1),
            "???-1001-201"
        );
    }

    #[test]
    fn test_same_band_orders_by_descending_y() {
        let tol = 3000.0 / 304.8;
        let items = vec![("low", Point::xy(100.0, 5.0)), ("high", Point::xy(100.0 - tol * 0.5, 50.0))];
        let ordered = order_by_bands(items, |i| i.1, tol);
        let labels: Vec<_> = ordered.iter().map(|i| i.0).collect();
        assert_eq!(labels, vec!["high", "low"]);
    }

    #[test]
    fn test_bands_run_right_to_left() {
        let items = vec![
            ("a", Point::xy(0.0, 10.0)),
            ("b", Point::xy(50.0, 0.0)),
            ("c", Point::xy(51.0, 20.0)),
            ("d", Point::xy(2.0, 30.0)),
        ];
        let ordered = order_by_bands(items, |i| i.1, 5.0);
        let labels: Vec<_> = ordered.iter().map(|i| i.0).collect();
        assert_eq!(labels, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_band_chains_through_neighbours() {
        // 10 -> 7 -> 4 are each within tolerance of the previous item
        let items = vec![
            ("x4", Point::xy(4.0, 3.0)),
            ("x10", Point::xy(10.0, 1.0)),
            ("x7", Point::xy(7.0, 2.0)),
        ];
        let ordered = order_by_bands(items, |i| i.1, 3.0);
        let labels: Vec<_> = ordered.iter().map(|i| i.0).collect();
        assert_eq!(labels, vec!["x4", "x7", "x10"]);
    }

    #[test]
    fn test_equal_points_keep_input_order() {
        let items = vec![("first", Point::xy(1.0, 1.0)), ("second", Point::xy(1.0, 1.0))];
        let ordered = order_by_bands(items, |i| i.1, 0.0);
        assert_eq!(ordered[0].0, "first");
        assert_eq!(ordered[1].0, "second");
    }

    #[test]
    fn test_number_check_outcomes() {
        let candidate = RoomCandidate {
            room: ElementId(30),
            name: "Office".into(),
            number: "L2-1001-0103".into(),
            function_id: Some(1),
            category: AreaCategory::FrontOfHouse,
            level_code: LevelCode {
                code: "L2".into(),
                matched_by: crate::level::LevelMatch::Name,
            },
            sector: sector(),
            point: Point::xy(0.0, 0.0),
        };
        assert!(matches!(
            number_check(candidate.clone(), 2, 3),
            RoomOutcome::Valid { .. }
        ));
        match number_check(candidate, 2, 1) {
            RoomOutcome::Mismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, "L2-1001-0101");
                assert_eq!(found, "L2-1001-0103");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
