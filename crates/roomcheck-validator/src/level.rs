// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level code resolution
//!
//! Maps a level to its short code using the level table (elevation in mm ->
//! code). Matching is attempted by name first and by nearest elevation last;
//! it never fails, falling back to [`UNKNOWN_LEVEL_CODE`].

use roomcheck_model::LevelInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel code for levels that cannot be resolved
pub const UNKNOWN_LEVEL_CODE: &str = "???";

/// How a level code was found
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMatch {
    /// Level name equals the code, or ends with `" " + code`
    Name,
    /// Code appears somewhere in the level name
    Substring,
    /// Table entry closest to the level's elevation
    NearestElevation,
    /// Nothing matched
    Unknown,
}

/// A resolved level code
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCode {
    pub code: String,
    pub matched_by: LevelMatch,
}

impl LevelCode {
    fn new(code: impl Into<String>, matched_by: LevelMatch) -> Self {
        Self {
            code: code.into(),
            matched_by,
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LEVEL_CODE, LevelMatch::Unknown)
    }

    pub fn is_known(&self) -> bool {
        self.matched_by != LevelMatch::Unknown
    }
}

/// Elevation (rounded mm) -> level code
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelCodeTable {
    codes: BTreeMap<i64, String>,
}

impl LevelCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; codes are stored uppercased
    pub fn insert(&mut self, elevation_mm: i64, code: impl AsRef<str>) {
        self.codes
            .insert(elevation_mm, code.as_ref().trim().to_uppercase());
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending elevation order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.codes.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Match a level name against the table's codes
    pub fn match_name(&self, level_name: &str) -> Option<LevelCode> {
        let name = level_name.trim().to_uppercase();
        for code in self.codes.values() {
            if name == *code || name.ends_with(&format!(" {code}")) {
                return Some(LevelCode::new(code.clone(), LevelMatch::Name));
            }
        }
        self.codes
            .values()
            .find(|code| !code.is_empty() && name.contains(code.as_str()))
            .map(|code| LevelCode::new(code.clone(), LevelMatch::Substring))
    }

    /// Entry whose elevation is closest to `elevation_mm`
    ///
    /// Ties go to the lower elevation.
    pub fn nearest(&self, elevation_mm: f64) -> Option<&str> {
        self.codes
            .iter()
            .min_by(|(a, _), (b, _)| {
                let da = (**a as f64 - elevation_mm).abs();
                let db = (**b as f64 - elevation_mm).abs();
                da.total_cmp(&db)
            })
            .map(|(_, code)| code.as_str())
    }

    /// Resolve the code for a level
    ///
    /// # Arguments
    /// * `level` - The level, `None` if the element has no level
    /// * `length_unit_mm` - Millimetres per project unit, for the elevation
    pub fn resolve(&self, level: Option<&LevelInfo>, length_unit_mm: f64) -> LevelCode {
        let Some(level) = level else {
            log::warn!("level mapping error for '?': element has no level");
            return LevelCode::unknown();
        };
        if let Some(found) = self.match_name(&level.name) {
            return found;
        }
        let elevation_mm = level.elevation * length_unit_mm;
        match self.nearest(elevation_mm) {
            Some(code) => LevelCode::new(code, LevelMatch::NearestElevation),
            None => {
                log::warn!(
                    "level mapping error for '{}': level table is empty",
                    level.name
                );
                LevelCode::unknown()
            }
        }
    }
}

impl FromIterator<(i64, String)> for LevelCodeTable {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        let mut table = LevelCodeTable::new();
        for (elevation, code) in iter {
            table.insert(elevation, code);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcheck_model::{ElementId, MM_PER_FOOT};

    fn table() -> LevelCodeTable {
        [(0, "L1"), (6000, "L2"), (12000, "L3")]
            .into_iter()
            .map(|(e, c)| (e, c.to_string()))
            .collect()
    }

    fn level(name: &str, elevation_mm: f64) -> LevelInfo {
        LevelInfo::new(ElementId(1), name, elevation_mm / MM_PER_FOOT)
    }

    #[test]
    fn test_exact_elevation() {
        let code = table().resolve(Some(&level("Level 02", 6000.0)), MM_PER_FOOT);
        assert_eq!(code.code, "L2");
        assert_eq!(code.matched_by, LevelMatch::NearestElevation);
    }

    #[test]
    fn test_nearest_elevation_fallback() {
        let code = table().resolve(Some(&level("Level 02", 5990.0)), MM_PER_FOOT);
        assert_eq!(code.code, "L2");
        let code = table().resolve(Some(&level("Roof", 40000.0)), MM_PER_FOOT);
        assert_eq!(code.code, "L3");
    }

    #[test]
    fn test_name_match_wins_over_elevation() {
        let code = table().resolve(Some(&level("l3", 0.0)), MM_PER_FOOT);
        assert_eq!(code, LevelCode::new("L3", LevelMatch::Name));

        let code = table().resolve(Some(&level("Podium Level L2", 0.0)), MM_PER_FOOT);
        assert_eq!(code, LevelCode::new("L2", LevelMatch::Name));
    }

    #[test]
    fn test_substring_match() {
        let code = table().resolve(Some(&level("L2-Mezzanine", 0.0)), MM_PER_FOOT);
        assert_eq!(code, LevelCode::new("L2", LevelMatch::Substring));
    }

    #[test]
    fn test_missing_level_or_empty_table() {
        assert_eq!(table().resolve(None, MM_PER_FOOT), LevelCode::unknown());

        let empty = LevelCodeTable::new();
        let code = empty.resolve(Some(&level("Level 02", 6000.0)), MM_PER_FOOT);
        assert_eq!(code.code, UNKNOWN_LEVEL_CODE);
        assert!(!code.is_known());
    }

    #[test]
    fn test_nearest_tie_goes_to_lower_elevation() {
        assert_eq!(table().nearest(3000.0), Some("L1"));
    }
}
