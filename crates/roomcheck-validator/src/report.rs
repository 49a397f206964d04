// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation report
//!
//! Per-element outcomes are kept as data and aggregated into tallies here.
//! The report renders as markdown through `Display` and serializes to JSON
//! with serde.

use crate::doors::DoorOutcome;
use crate::function::ValidationMode;
use crate::rooms::RoomOutcome;
use crate::sector::SectorCode;
use roomcheck_model::{ElementId, PhaseInfo};
use serde::Serialize;
use std::fmt;

/// Category of a per-element failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required parameter does not exist on the element
    MissingParameter,
    /// The room is not placed on a level
    MissingLevel,
    /// No sector contains the element's reference point
    NoSector,
    /// The door's mark is missing or empty
    MissingMark,
    /// The door has no adjoining room in the validation phase
    NoReferenceRoom,
    /// The door's reference room has no number
    ReferenceRoomMissingNumber,
    /// The host raised while the element was being read
    Host,
}

/// A per-element failure, counted as an issue
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElementIssue {
    pub element: ElementId,
    pub kind: IssueKind,
    pub message: String,
}

impl ElementIssue {
    pub fn new(element: ElementId, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            element,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ElementIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Why an element was left out without counting
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Room category does not match the run's mode
    FilteredByMode,
    /// Element belongs to another sector than the view
    OtherSector(SectorCode),
    /// Room has neither a location nor a bounding box
    NoPlacement,
    /// Door is flagged as not scheduled
    NotForSchedule,
}

/// How an outcome counts towards the tally
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    Valid,
    Issue,
    Skipped,
}

/// A per-element outcome that can be tallied and printed
pub trait Outcome {
    fn status(&self) -> OutcomeStatus;

    /// Write the outcome's report line, if it has one
    fn write_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Valid and issue counts of a section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub valid: usize,
    pub issues: usize,
}

impl Tally {
    pub fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Valid => self.valid += 1,
            OutcomeStatus::Issue => self.issues += 1,
            OutcomeStatus::Skipped => {}
        }
    }
}

/// A free-form line in a section
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "text", rename_all = "snake_case")]
pub enum Note {
    Info(String),
    Warning(String),
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::Info(text) => write!(f, "- {text}"),
            Note::Warning(text) => write!(f, "- ⚠️ {text}"),
        }
    }
}

/// Whether a section's elements were checked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    Checked,
    /// The view shows no elements of this kind
    Empty,
    /// The view's sector could not be determined
    NoViewSector,
}

/// Results for one kind of element in one view
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section<O> {
    pub state: SectionState,
    pub view_sector: Option<SectorCode>,
    pub notes: Vec<Note>,
    pub outcomes: Vec<O>,
    pub tally: Tally,
}

impl<O: Outcome> Section<O> {
    /// Section for a view without elements of this kind
    pub fn empty(what: &str) -> Self {
        Self::unchecked(
            SectionState::Empty,
            Note::Info(format!("No {what} found in this view.")),
        )
    }

    /// Section for a view whose sector is unknown
    pub fn no_view_sector(note: impl Into<String>) -> Self {
        Self::unchecked(SectionState::NoViewSector, Note::Warning(note.into()))
    }

    fn unchecked(state: SectionState, note: Note) -> Self {
        Self {
            state,
            view_sector: None,
            notes: vec![note],
            outcomes: Vec::new(),
            tally: Tally::default(),
        }
    }

    /// Checked section; the tally is computed from the outcomes
    pub fn checked(view_sector: SectorCode, notes: Vec<Note>, outcomes: Vec<O>) -> Self {
        let mut tally = Tally::default();
        for outcome in &outcomes {
            tally.record(outcome.status());
        }
        Self {
            state: SectionState::Checked,
            view_sector: Some(view_sector),
            notes,
            outcomes,
            tally,
        }
    }

    fn write_body(&self, f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
        for note in &self.notes {
            writeln!(f, "{note}")?;
        }
        if self.state != SectionState::Checked {
            return Ok(());
        }
        for outcome in &self.outcomes {
            outcome.write_line(f)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{label} OK: {}, Issues: {}",
            self.tally.valid, self.tally.issues
        )?;
        writeln!(f)
    }
}

/// Sizes of the loaded lookup tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub door_rules: usize,
    pub function_entries: usize,
    pub level_entries: usize,
}

/// Full result of one validation run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationReport {
    pub tables: TableSummary,
    pub mode: ValidationMode,
    pub phase: PhaseInfo,
    pub scope_boxes_loaded: usize,
    pub view_name: String,
    pub rooms: Section<RoomOutcome>,
    pub doors: Section<DoorOutcome>,
}

impl ValidationReport {
    /// Combined tally of rooms and doors
    pub fn total(&self) -> Tally {
        Tally {
            valid: self.rooms.tally.valid + self.doors.tally.valid,
            issues: self.rooms.tally.issues + self.doors.tally.issues,
        }
    }

    /// True when no issue was found
    pub fn is_clean(&self) -> bool {
        self.total().issues == 0
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Config Files Loaded")?;
        writeln!(f, "- Door rules: `{}`", self.tables.door_rules)?;
        writeln!(f, "- Function map: `{}`", self.tables.function_entries)?;
        writeln!(f, "- Level map: `{}`", self.tables.level_entries)?;
        writeln!(f)?;
        writeln!(f, "### Validation Mode: **{}**", self.mode)?;
        writeln!(f, "### Scope Boxes Loaded: {}", self.scope_boxes_loaded)?;
        writeln!(f, "### 🔹 Validating View: `{}`", self.view_name)?;

        writeln!(f, "## Room Number Validation")?;
        if let Some(sector) = &self.rooms.view_sector {
            writeln!(f, "- Using View Sector: `{sector}`")?;
        }
        self.rooms.write_body(f, "Rooms")?;

        writeln!(f, "## Door Number Validation")?;
        writeln!(f, "NOTE: Only check the door number after room numbers are corrected!!")?;
        self.doors.write_body(f, "Doors")?;

        writeln!(f, "---")?;
        writeln!(f, "Validation completed.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(OutcomeStatus);

    impl Outcome for Fixed {
        fn status(&self) -> OutcomeStatus {
            self.0
        }

        fn write_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "• {:?}", self.0)
        }
    }

    struct Render<'a>(&'a Section<Fixed>);

    impl fmt::Display for Render<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.write_body(f, "Things")
        }
    }

    fn sector() -> SectorCode {
        crate::sector::parse_sector_code("100_1001").unwrap()
    }

    #[test]
    fn test_tally_ignores_skips() {
        let section = Section::checked(
            sector(),
            Vec::new(),
            vec![
                Fixed(OutcomeStatus::Valid),
                Fixed(OutcomeStatus::Skipped),
                Fixed(OutcomeStatus::Issue),
                Fixed(OutcomeStatus::Valid),
            ],
        );
        assert_eq!(section.tally, Tally { valid: 2, issues: 1 });
        let text = Render(&section).to_string();
        assert!(text.ends_with("\nThings OK: 2, Issues: 1\n\n"));
    }

    #[test]
    fn test_unchecked_sections_print_only_notes() {
        let empty: Section<Fixed> = Section::empty("things");
        assert_eq!(Render(&empty).to_string(), "- No things found in this view.\n");

        let unknown: Section<Fixed> =
            Section::no_view_sector("Could not determine sector code for this view.");
        assert_eq!(unknown.state, SectionState::NoViewSector);
        assert_eq!(
            Render(&unknown).to_string(),
            "- ⚠️ Could not determine sector code for this view.\n"
        );
    }
}
