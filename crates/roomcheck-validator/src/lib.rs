// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roomcheck Validator
//!
//! Room and door numbering rules for building documents. This crate works
//! against the `HostDocument` trait from `roomcheck-model`, so the rules run
//! the same on any host implementation.
//!
//! ## Overview
//!
//! - **Sectors**: scope boxes named `100_<4 digits>` split the plan into
//!   sectors; every element belongs to at most one
//! - **Level codes**: level name or nearest elevation, from the level table
//! - **Function ids**: function table lookup with a fallback to the digit
//!   encoded in the room number, classified front/back-of-house
//! - **Rooms**: expected number `{level}-{sector}-{function id}{sequence:02}`
//!   from a banded right-to-left, top-to-bottom ordering
//! - **Doors**: mark must be the reference room's number plus an optional
//!   uppercase letter
//!
//! Per-element problems are recorded in the [`ValidationReport`]; only a
//! missing validation phase or view fails a run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomcheck_validator::{ConfigTables, ValidationMode, Validator, ValidatorConfig};
//!
//! let doc = roomcheck_snapshot::load_path("tower-l2.json")?;
//! let config = ValidatorConfig::default();
//! let tables = ConfigTables::load(Path::new("config"), &config.tables)?;
//!
//! let report = Validator::new(&doc, &config, &tables, ValidationMode::All).run()?;
//! println!("{report}");
//! ```

pub mod config;
pub mod doors;
pub mod error;
pub mod function;
pub mod level;
pub mod placement;
pub mod report;
pub mod rooms;
pub mod run;
pub mod sector;
pub mod tables;

pub use config::{ParameterNames, TableFiles, ValidatorConfig};
pub use doors::{choose_reference_room, mark_matches, DoorOutcome, DoorValidator, ReferenceRoomPolicy};
pub use error::{Error, Result};
pub use function::{
    normalize_function_id, AreaCategory, AreaClassifier, FunctionId, FunctionTable,
    RawFunctionCode, ValidationMode,
};
pub use level::{LevelCode, LevelCodeTable, LevelMatch, UNKNOWN_LEVEL_CODE};
pub use report::{
    ElementIssue, IssueKind, Note, Outcome, OutcomeStatus, Section, SectionState, SkipReason,
    TableSummary, Tally, ValidationReport,
};
pub use rooms::{expected_room_number, order_by_bands, RoomOutcome, RoomValidator};
pub use run::{view_sector, ConfigTables, Validator};
pub use sector::{parse_sector_code, SectorCode, SectorIndex, SectorRegion};
pub use tables::{CellValue, DoorDirectionRules, JsonTableFile, Table, TableSource};
