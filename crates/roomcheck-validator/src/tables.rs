// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External lookup tables
//!
//! The lookup tables are spreadsheets maintained by the project team: a
//! header row followed by data rows. They are exported as JSON workbooks (an
//! array of rows, each an array of scalar cells) and read once per run.

use crate::level::LevelCodeTable;
use crate::function::FunctionTable;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Function ids that mean "no function" in the function table
const FUNCTION_ID_SENTINELS: [&str; 3] = ["", "N", "N/A"];

/// Level codes that mean "no code" in the level table
const LEVEL_CODE_SENTINELS: [&str; 2] = ["", "N/A"];

/// A spreadsheet cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True for empty cells and empty strings
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Cell rendered as text; `None` for empty cells
    ///
    /// Integral numbers render without a fractional part.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    /// Cell as a number, parsing text cells
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|n: &f64| n.is_finite())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text().unwrap_or_default())
    }
}

/// A sheet: header row plus data rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build from raw rows, stopping at the first fully empty row
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let rows = rows
            .into_iter()
            .take_while(|row| !row.iter().all(CellValue::is_blank))
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows including the header
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    /// Column index of a header, matched trimmed and case-insensitively
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_uppercase();
        self.header()?.iter().position(|cell| {
            cell.as_text()
                .map(|t| t.trim().to_uppercase() == wanted)
                .unwrap_or(false)
        })
    }
}

/// Anything a table can be read from
pub trait TableSource {
    /// Short name for diagnostics
    fn name(&self) -> String;

    /// Read the first sheet
    fn read_table(&self) -> Result<Table>;
}

/// JSON workbook on disk
#[derive(Clone, Debug)]
pub struct JsonTableFile {
    path: PathBuf,
}

impl JsonTableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for JsonTableFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// A missing file reads as an empty table
    fn read_table(&self) -> Result<Table> {
        if !self.path.exists() {
            log::warn!("table {} not found, using an empty table", self.name());
            return Ok(Table::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        parse_json_table(&content).map_err(|e| Error::table(self.name(), e.to_string()))
    }
}

/// Parse a JSON workbook (array of rows of scalar cells)
pub fn parse_json_table(content: &str) -> std::result::Result<Table, serde_json::Error> {
    let rows: Vec<Vec<CellValue>> = serde_json::from_str(content)?;
    Ok(Table::from_rows(rows))
}

/// Door direction rules: three ordered value lists
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorDirectionRules {
    pub flip_contains: Vec<String>,
    pub flip_search_contains: Vec<String>,
    pub block_flip_equals: Vec<String>,
}

impl DoorDirectionRules {
    /// Total number of rule values
    pub fn len(&self) -> usize {
        self.flip_contains.len() + self.flip_search_contains.len() + self.block_flip_equals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read door direction rules from the first three columns
///
/// Values are trimmed and uppercased; reading stops at the first row where
/// all three cells are empty.
pub fn read_door_direction_rules(table: &Table) -> DoorDirectionRules {
    let mut rules = DoorDirectionRules::default();
    for row in table.data_rows() {
        let cell = |i: usize| row.get(i).filter(|c| !c.is_blank());
        let (c1, c2, c3) = (cell(0), cell(1), cell(2));
        if c1.is_none() && c2.is_none() && c3.is_none() {
            break;
        }
        let push = |list: &mut Vec<String>, value: Option<&CellValue>| {
            if let Some(text) = value.and_then(CellValue::as_text) {
                list.push(text.trim().to_uppercase());
            }
        };
        push(&mut rules.flip_contains, c1);
        push(&mut rules.flip_search_contains, c2);
        push(&mut rules.block_flip_equals, c3);
    }
    rules
}

/// Read the function table (`GIFA NAME` -> `FUNCTION ID`)
///
/// Returns an empty table when either header is missing.
pub fn read_function_map(table: &Table) -> FunctionTable {
    let mut functions = FunctionTable::new();
    let (Some(name_col), Some(id_col)) = (table.column("GIFA NAME"), table.column("FUNCTION ID"))
    else {
        if !table.is_empty() {
            log::warn!("function table is missing the GIFA NAME or FUNCTION ID header");
        }
        return functions;
    };
    for row in table.data_rows() {
        let (Some(name), Some(id)) = (row.get(name_col), row.get(id_col)) else {
            continue;
        };
        let Some(name) = name.as_text().filter(|n| !n.is_empty()) else {
            continue;
        };
        let Some(id) = id.as_text() else {
            continue;
        };
        if FUNCTION_ID_SENTINELS.contains(&id.trim()) {
            continue;
        }
        functions.insert(name, id);
    }
    functions
}

/// Read the level table (`ELEVATION` -> `CODE`)
///
/// Elevations are rounded to whole millimetres; rows with a non-numeric
/// elevation or a sentinel code are skipped.
pub fn read_level_map(table: &Table) -> LevelCodeTable {
    let mut levels = LevelCodeTable::new();
    let (Some(elev_col), Some(code_col)) = (table.column("ELEVATION"), table.column("CODE")) else {
        if !table.is_empty() {
            log::warn!("level table is missing the ELEVATION or CODE header");
        }
        return levels;
    };
    for row in table.data_rows() {
        let (Some(elevation), Some(code)) = (row.get(elev_col), row.get(code_col)) else {
            continue;
        };
        let Some(code) = code.as_text() else {
            continue;
        };
        if LEVEL_CODE_SENTINELS.contains(&code.trim()) {
            continue;
        }
        let Some(elevation) = elevation.as_number() else {
            log::debug!("skipping level row with elevation '{elevation}'");
            continue;
        };
        levels.insert(elevation.round() as i64, code);
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: &str) -> Table {
        parse_json_table(json).unwrap()
    }

    #[test]
    fn test_cell_values() {
        let t = table(r#"[["a", 1, 2.5, true, null]]"#);
        let row = t.header().unwrap();
        assert_eq!(row[0], CellValue::Text("a".into()));
        assert_eq!(row[1].as_text().as_deref(), Some("1"));
        assert_eq!(row[2].as_text().as_deref(), Some("2.5"));
        assert_eq!(row[3], CellValue::Bool(true));
        assert!(row[4].is_blank());
        assert_eq!(CellValue::Text(" 6000 ".into()).as_number(), Some(6000.0));
    }

    #[test]
    fn test_reading_stops_at_empty_row() {
        let t = table(r#"[["H1"], ["a"], [null, ""], ["b"]]"#);
        assert_eq!(t.row_count(), 2);
    }

    #[test]
    fn test_function_map() {
        let t = table(
            r#"[
                [" gifa name ", "Area", "FUNCTION ID"],
                ["Office", 120, 1],
                ["store", 10, "3A"],
                ["Plant", 5, "N/A"],
                ["Riser", 5, "N"],
                ["", 5, 4],
                ["Short row"]
            ]"#,
        );
        let map = read_function_map(&t);
        assert_eq!(map.len(), 2);
        assert_eq!(map.code("OFFICE"), Some("1"));
        assert_eq!(map.code("Store"), Some("3A"));
        assert!(map.code("PLANT").is_none());
    }

    #[test]
    fn test_level_map() {
        let t = table(
            r#"[
                ["Elevation", "Code"],
                [0, "l1"],
                [5999.6, "L2"],
                ["12000", " L3 "],
                ["roof", "RF"],
                [15000, "N/A"],
                [18000, null]
            ]"#,
        );
        let map = read_level_map(&t);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![(0, "L1"), (6000, "L2"), (12000, "L3")]);
    }

    #[test]
    fn test_door_direction_rules() {
        let t = table(
            r#"[
                ["Flip If Contains", "Flip If Search Contains", "Block Flip If Equals"],
                [" corridor ", null, "STAIR"],
                [null, "lobby", null],
                ["wc", null, null],
                [null, null, null],
                ["ignored"]
            ]"#,
        );
        let rules = read_door_direction_rules(&t);
        assert_eq!(rules.flip_contains, vec!["CORRIDOR", "WC"]);
        assert_eq!(rules.flip_search_contains, vec!["LOBBY"]);
        assert_eq!(rules.block_flip_equals, vec!["STAIR"]);
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_empty_and_header_only_tables() {
        for json in ["[]", r#"[["GIFA NAME", "FUNCTION ID", "ELEVATION", "CODE"]]"#] {
            let t = table(json);
            assert!(read_function_map(&t).is_empty());
            assert!(read_level_map(&t).is_empty());
            assert!(read_door_direction_rules(&t).is_empty());
        }
    }

    #[test]
    fn test_missing_headers_yield_empty_maps() {
        let t = table(r#"[["NAME", "ID"], ["Office", 1]]"#);
        assert!(read_function_map(&t).is_empty());
        assert!(read_level_map(&t).is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let source = JsonTableFile::new("/nonexistent/roomcheck/level_map.json");
        assert!(source.read_table().unwrap().is_empty());
    }
}
