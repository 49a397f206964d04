// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function ids and front/back-of-house classification

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Numeric room function id
pub type FunctionId = u32;

/// Function ids counted as front-of-house by default
pub const DEFAULT_FRONT_OF_HOUSE_IDS: [FunctionId; 5] = [1, 5, 6, 8, 9];

/// Function ids counted as back-of-house by default
pub const DEFAULT_BACK_OF_HOUSE_IDS: [FunctionId; 5] = [2, 3, 7, 8, 9];

/// Default width of the function id field in a room number (`L2-1001-0103`)
pub const DEFAULT_FUNCTION_ID_DIGITS: usize = 2;

/// A function code as it arrives from a table or parameter
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawFunctionCode {
    Integer(i64),
    Text(String),
}

impl From<&str> for RawFunctionCode {
    fn from(s: &str) -> Self {
        RawFunctionCode::Text(s.to_string())
    }
}

impl From<i64> for RawFunctionCode {
    fn from(v: i64) -> Self {
        RawFunctionCode::Integer(v)
    }
}

/// Normalize a raw function code to a function id
///
/// Integers pass through, all-digit strings are parsed whole, and strings
/// starting with a digit yield that single digit.
pub fn normalize_function_id(raw: &RawFunctionCode) -> Option<FunctionId> {
    match raw {
        RawFunctionCode::Integer(v) => FunctionId::try_from(*v).ok(),
        RawFunctionCode::Text(s) => {
            let s = s.trim();
            let first = s.chars().next()?;
            if s.chars().all(|c| c.is_ascii_digit()) {
                s.parse().ok()
            } else {
                first.to_digit(10)
            }
        }
    }
}

/// Function id encoded in a room number such as `L2-1001-0103`
///
/// The number must have exactly three hyphen-separated segments; the first
/// `digits` characters of the last one must be digits and form the id.
pub fn function_id_from_room_number(room_number: &str, digits: usize) -> Option<FunctionId> {
    let parts: Vec<&str> = room_number.split('-').collect();
    if parts.len() != 3 || digits == 0 {
        return None;
    }
    let head = parts[2].get(..digits)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

/// Function name (uppercased) -> function code
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionTable {
    entries: BTreeMap<String, String>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, code: impl AsRef<str>) {
        self.entries.insert(
            name.as_ref().trim().to_uppercase(),
            code.as_ref().trim().to_string(),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw code for a function name, case-insensitive
    pub fn code(&self, function_name: &str) -> Option<&str> {
        self.entries
            .get(&function_name.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Function id for a room
    ///
    /// Looks the function name up in the table first and falls back to the
    /// id encoded in the room's current number.
    pub fn function_id(
        &self,
        function_name: &str,
        room_number: &str,
        digits: usize,
    ) -> Option<FunctionId> {
        self.code(function_name)
            .and_then(|code| normalize_function_id(&RawFunctionCode::from(code)))
            .or_else(|| function_id_from_room_number(room_number, digits))
    }
}

impl FromIterator<(String, String)> for FunctionTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = FunctionTable::new();
        for (name, code) in iter {
            table.insert(name, code);
        }
        table
    }
}

/// Front/back-of-house category of a room
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaCategory {
    #[serde(rename = "FOH")]
    FrontOfHouse,
    #[serde(rename = "BOH")]
    BackOfHouse,
    #[serde(rename = "FOH & BOH")]
    Both,
    #[serde(rename = "UNASSIGNED")]
    Unassigned,
}

impl AreaCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AreaCategory::FrontOfHouse => "FOH",
            AreaCategory::BackOfHouse => "BOH",
            AreaCategory::Both => "FOH & BOH",
            AreaCategory::Unassigned => "UNASSIGNED",
        }
    }

    pub fn is_front_of_house(&self) -> bool {
        matches!(self, AreaCategory::FrontOfHouse | AreaCategory::Both)
    }

    pub fn is_back_of_house(&self) -> bool {
        matches!(self, AreaCategory::BackOfHouse | AreaCategory::Both)
    }
}

impl fmt::Display for AreaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies function ids using two membership sets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaClassifier {
    front_of_house: BTreeSet<FunctionId>,
    back_of_house: BTreeSet<FunctionId>,
}

impl Default for AreaClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FRONT_OF_HOUSE_IDS, DEFAULT_BACK_OF_HOUSE_IDS)
    }
}

impl AreaClassifier {
    pub fn new(
        front_of_house: impl IntoIterator<Item = FunctionId>,
        back_of_house: impl IntoIterator<Item = FunctionId>,
    ) -> Self {
        Self {
            front_of_house: front_of_house.into_iter().collect(),
            back_of_house: back_of_house.into_iter().collect(),
        }
    }

    pub fn classify(&self, function_id: Option<FunctionId>) -> AreaCategory {
        let Some(id) = function_id else {
            return AreaCategory::Unassigned;
        };
        match (
            self.front_of_house.contains(&id),
            self.back_of_house.contains(&id),
        ) {
            (true, true) => AreaCategory::Both,
            (true, false) => AreaCategory::FrontOfHouse,
            (false, true) => AreaCategory::BackOfHouse,
            (false, false) => AreaCategory::Unassigned,
        }
    }
}

/// Which rooms a run validates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationMode {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "FOH")]
    FrontOfHouse,
    #[serde(rename = "BOH")]
    BackOfHouse,
}

impl ValidationMode {
    /// Parse a mode from its menu label or short alias
    ///
    /// Unknown labels select [`ValidationMode::All`].
    pub fn from_alias(alias: &str) -> Self {
        match alias.trim().to_uppercase().as_str() {
            "FOH" | "FRONT OF HOUSE (FOH)" | "FRONT OF HOUSE" => ValidationMode::FrontOfHouse,
            "BOH" | "BACK OF HOUSE (BOH)" | "BACK OF HOUSE" => ValidationMode::BackOfHouse,
            _ => ValidationMode::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValidationMode::All => "ALL",
            ValidationMode::FrontOfHouse => "FOH",
            ValidationMode::BackOfHouse => "BOH",
        }
    }

    /// Whether rooms of this category take part in the run
    pub fn accepts(&self, category: AreaCategory) -> bool {
        match self {
            ValidationMode::All => true,
            ValidationMode::FrontOfHouse => category.is_front_of_house(),
            ValidationMode::BackOfHouse => category.is_back_of_house(),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
