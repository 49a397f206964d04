// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door mark validation
//!
//! A door's mark must echo the number of its reference room, optionally
//! followed by one uppercase letter (`L2-1001-01` -> `L2-1001-01A`).

use crate::config::ValidatorConfig;
use crate::placement::{door_reference_point, room_sector_point};
use crate::report::{ElementIssue, IssueKind, Outcome, OutcomeStatus, Section, SkipReason};
use crate::sector::{SectorCode, SectorIndex};
use roomcheck_model::{ElementId, HostDocument, Parameter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How to pick the reference room of a door with rooms on both sides
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRoomPolicy {
    /// The room on the door's "from" side
    #[default]
    PreferFrom,
    /// The room on the door's "to" side
    PreferTo,
    /// The first of (from, to) owned by the door's sector, else the from room
    PreferSameSector,
}

/// Pick a door's reference room
///
/// A door with a room on only one side always uses that room.
/// `sector_of` is only consulted by [`ReferenceRoomPolicy::PreferSameSector`].
pub fn choose_reference_room(
    policy: ReferenceRoomPolicy,
    from: Option<ElementId>,
    to: Option<ElementId>,
    door_sector: &SectorCode,
    sector_of: impl Fn(ElementId) -> Option<SectorCode>,
) -> Option<ElementId> {
    match policy {
        ReferenceRoomPolicy::PreferFrom => from.or(to),
        ReferenceRoomPolicy::PreferTo => to.or(from),
        ReferenceRoomPolicy::PreferSameSector => [from, to]
            .into_iter()
            .flatten()
            .find(|&room| sector_of(room).as_ref() == Some(door_sector))
            .or(from)
            .or(to),
    }
}

/// Check a mark against a room number
///
/// Matches `^{room_number}[A-Z]?$` with the room number taken literally.
/// A blank room number never matches.
pub fn mark_matches(mark: &str, room_number: &str) -> bool {
    if room_number.trim().is_empty() {
        return false;
    }
    match mark.strip_prefix(room_number) {
        Some("") => true,
        Some(suffix) => {
            let mut chars = suffix.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
        }
        None => false,
    }
}

/// Result of checking one door
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DoorOutcome {
    Valid {
        door: ElementId,
        room: ElementId,
        mark: String,
    },
    Mismatch {
        door: ElementId,
        room: ElementId,
        room_name: String,
        room_number: String,
        mark: String,
    },
    Skipped {
        door: ElementId,
        reason: SkipReason,
    },
    Failed(ElementIssue),
}

impl Outcome for DoorOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            DoorOutcome::Valid { .. } => OutcomeStatus::Valid,
            DoorOutcome::Mismatch { .. } | DoorOutcome::Failed(_) => OutcomeStatus::Issue,
            DoorOutcome::Skipped { .. } => OutcomeStatus::Skipped,
        }
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorOutcome::Mismatch {
                door,
                room_name,
                room_number,
                mark,
                ..
            } => writeln!(
                f,
                "• Door [{door}] → Room '{room_name}' [{room_number}] Expected `{room_number}`[A-Z] | Found `{mark}`"
            ),
            DoorOutcome::Failed(issue) => writeln!(f, "- {issue}"),
            DoorOutcome::Valid { .. } | DoorOutcome::Skipped { .. } => Ok(()),
        }
    }
}

/// Door mark validator for one view
pub struct DoorValidator<'a> {
    doc: &'a dyn HostDocument,
    config: &'a ValidatorConfig,
    sectors: &'a SectorIndex,
    phase: ElementId,
}

impl<'a> DoorValidator<'a> {
    /// # Arguments
    /// * `phase` - Phase whose door/room adjacency is used
    pub fn new(
        doc: &'a dyn HostDocument,
        config: &'a ValidatorConfig,
        sectors: &'a SectorIndex,
        phase: ElementId,
    ) -> Self {
        Self {
            doc,
            config,
            sectors,
            phase,
        }
    }

    /// Validate the doors of a view owned by `view_sector`
    pub fn validate(&self, doors: &[ElementId], view_sector: &SectorCode) -> Section<DoorOutcome> {
        let outcomes = doors
            .iter()
            .map(|&door| self.check(door, view_sector))
            .collect();
        Section::checked(view_sector.clone(), Vec::new(), outcomes)
    }

    /// Check a single door
    pub fn check(&self, door: ElementId, view_sector: &SectorCode) -> DoorOutcome {
        self.try_check(door, view_sector).unwrap_or_else(|e| {
            log::debug!("door {door}: {e}");
            DoorOutcome::Failed(ElementIssue::new(
                door,
                IssueKind::Host,
                format!("Error validating Door [{door}]: {e}"),
            ))
        })
    }

    /// Whether a comment on the door or its type carries the skip phrase
    ///
    /// Host errors while reading the comments count as "not excluded".
    pub fn is_excluded(&self, door: ElementId) -> bool {
        self.comments_mention_skip_phrase(door).unwrap_or_else(|e| {
            log::debug!("door {door}: could not read comments: {e}");
            false
        })
    }

    fn comments_mention_skip_phrase(&self, door: ElementId) -> roomcheck_model::Result<bool> {
        let params = self.doc.parameters();
        let names = &self.config.parameters;
        let phrase = self.config.skip_phrase.to_uppercase();
        let mentions = |p: Option<Parameter>| {
            p.and_then(|p| p.value)
                .is_some_and(|v| v.to_uppercase().contains(&phrase))
        };

        if mentions(params.type_parameter(door, &names.type_comments)?) {
            return Ok(true);
        }
        Ok(mentions(params.parameter(door, &names.door_comments)?))
    }

    fn try_check(
        &self,
        door: ElementId,
        view_sector: &SectorCode,
    ) -> roomcheck_model::Result<DoorOutcome> {
        if self.is_excluded(door) {
            return Ok(skipped(door, SkipReason::NotForSchedule));
        }

        let geometry = self.doc.geometry();
        let point = door_reference_point(geometry, door);
        let Some(door_sector) = self.sectors.resolve(point.as_ref()).cloned() else {
            return Ok(failed(
                door,
                IssueKind::NoSector,
                format!("Door [{door}] could not resolve sector."),
            ));
        };
        if door_sector != *view_sector {
            return Ok(skipped(door, SkipReason::OtherSector(door_sector)));
        }

        let params = self.doc.parameters();
        let names = &self.config.parameters;
        let Some(mark) = params
            .parameter(door, &names.door_mark)?
            .and_then(|p| p.value)
            .filter(|v| !v.trim().is_empty())
        else {
            return Ok(failed(
                door,
                IssueKind::MissingMark,
                format!("Door [{door}] has no Mark."),
            ));
        };

        let (from, to) = self
            .doc
            .adjacency()
            .adjoining_rooms(door, self.phase)
            .unwrap_or_else(|e| {
                log::debug!("door {door}: {e}");
                (None, None)
            });
        let reference = choose_reference_room(
            self.config.reference_room_policy,
            from,
            to,
            &door_sector,
            |room| {
                self.sectors
                    .resolve(room_sector_point(geometry, room).as_ref())
                    .cloned()
            },
        );
        let Some(room) = reference else {
            return Ok(failed(
                door,
                IssueKind::NoReferenceRoom,
                format!("Door [{door}] has no room reference."),
            ));
        };

        let Some(room_number) = params
            .parameter(room, &names.room_number)?
            .and_then(|p| p.value)
            .filter(|v| !v.trim().is_empty())
        else {
            return Ok(failed(
                door,
                IssueKind::ReferenceRoomMissingNumber,
                format!("Door [{door}] reference room missing Number."),
            ));
        };

        if mark_matches(&mark, &room_number) {
            return Ok(DoorOutcome::Valid { door, room, mark });
        }
        let room_name = params
            .parameter(room, &names.room_name)
            .ok()
            .flatten()
            .and_then(|p| p.value)
            .unwrap_or_default();
        Ok(DoorOutcome::Mismatch {
            door,
            room,
            room_name,
            room_number,
            mark,
        })
    }
}

fn failed(door: ElementId, kind: IssueKind, message: String) -> DoorOutcome {
    DoorOutcome::Failed(ElementIssue::new(door, kind, message))
}

fn skipped(door: ElementId, reason: SkipReason) -> DoorOutcome {
    DoorOutcome::Skipped { door, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::parse_sector_code;

    fn code(s: &str) -> SectorCode {
        parse_sector_code(&format!("100_{s}")).unwrap()
    }

    #[test]
    fn test_mark_with_suffix_letter() {
        assert!(mark_matches("L2-1001-01A", "L2-1001-01"));
        assert!(mark_matches("L2-1001-01", "L2-1001-01"));
        assert!(!mark_matches("L2-1001-01B2", "L2-1001-01"));
        assert!(!mark_matches("L2-1001-01a", "L2-1001-01"));
        assert!(!mark_matches("L2-1001-02A", "L2-1001-01"));
        assert!(!mark_matches("", "L2-1001-01"));
    }

    #[test]
    fn test_room_number_taken_literally() {
        assert!(mark_matches("L2.1001(A)B", "L2.1001(A)"));
        assert!(!mark_matches("L2x1001", "L2.1001"));
        assert!(!mark_matches("A", ""));
        assert!(!mark_matches("", ""));
    }

    #[test]
    fn test_single_sided_doors() {
        let sector = code("1001");
        let none = |_: ElementId| -> Option<SectorCode> { None };
        for policy in [
            ReferenceRoomPolicy::PreferFrom,
            ReferenceRoomPolicy::PreferTo,
            ReferenceRoomPolicy::PreferSameSector,
        ] {
            assert_eq!(
                choose_reference_room(policy, Some(ElementId(1)), None, &sector, none),
                Some(ElementId(1))
            );
            assert_eq!(
                choose_reference_room(policy, None, Some(ElementId(2)), &sector, none),
                Some(ElementId(2))
            );
            assert_eq!(choose_reference_room(policy, None, None, &sector, none), None);
        }
    }

    #[test]
    fn test_two_sided_door_policies() {
        let sector = code("1001");
        let from = Some(ElementId(1));
        let to = Some(ElementId(2));
        let owner = |room: ElementId| Some(if room.0 == 2 { code("1001") } else { code("1002") });

        assert_eq!(
            choose_reference_room(ReferenceRoomPolicy::PreferFrom, from, to, &sector, owner),
            from
        );
        assert_eq!(
            choose_reference_room(ReferenceRoomPolicy::PreferTo, from, to, &sector, owner),
            to
        );
        assert_eq!(
            choose_reference_room(ReferenceRoomPolicy::PreferSameSector, from, to, &sector, owner),
            to
        );
        assert_eq!(
            choose_reference_room(ReferenceRoomPolicy::PreferSameSector, from, to, &code("3003"), owner),
            from
        );
    }
}
