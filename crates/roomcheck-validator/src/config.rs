// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run configuration
//!
//! Every knob has a default matching the project's conventions, so an empty
//! TOML file (or no file at all) is a valid configuration.

use crate::doors::ReferenceRoomPolicy;
use crate::function::{
    AreaClassifier, FunctionId, DEFAULT_BACK_OF_HOUSE_IDS, DEFAULT_FRONT_OF_HOUSE_IDS,
    DEFAULT_FUNCTION_ID_DIGITS,
};
use crate::sector::DEFAULT_SECTOR_EPSILON;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default phrase that excludes a door from validation
pub const DEFAULT_SKIP_PHRASE: &str = "NOT FOR DOOR SCHEDULE";

/// Default band tolerance for room ordering, in millimetres
pub const DEFAULT_BAND_TOLERANCE_MM: f64 = 3000.0;

/// Validation run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Phase names searched for door adjacency, case-insensitive, in order
    pub phase_names: Vec<String>,
    /// Sector boundary tolerance in project units
    pub sector_epsilon: f64,
    /// Maximum X distance between neighbours of one room band, in mm
    pub band_tolerance_mm: f64,
    /// Zero-padded width of the function id in room numbers
    pub function_id_digits: usize,
    /// Comment phrase that excludes a door, case-insensitive
    pub skip_phrase: String,
    /// How a door's reference room is picked when it has two
    pub reference_room_policy: ReferenceRoomPolicy,
    pub front_of_house_ids: Vec<FunctionId>,
    pub back_of_house_ids: Vec<FunctionId>,
    pub parameters: ParameterNames,
    pub tables: TableFiles,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            phase_names: vec!["new construction".to_string(), "new".to_string()],
            sector_epsilon: DEFAULT_SECTOR_EPSILON,
            band_tolerance_mm: DEFAULT_BAND_TOLERANCE_MM,
            function_id_digits: DEFAULT_FUNCTION_ID_DIGITS,
            skip_phrase: DEFAULT_SKIP_PHRASE.to_string(),
            reference_room_policy: ReferenceRoomPolicy::default(),
            front_of_house_ids: DEFAULT_FRONT_OF_HOUSE_IDS.to_vec(),
            back_of_house_ids: DEFAULT_BACK_OF_HOUSE_IDS.to_vec(),
            parameters: ParameterNames::default(),
            tables: TableFiles::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.phase_names.iter().all(|n| n.trim().is_empty()) {
            return Err(Error::config("phase_names must name at least one phase"));
        }
        if !self.sector_epsilon.is_finite() || self.sector_epsilon < 0.0 {
            return Err(Error::config(format!(
                "sector_epsilon must be a non-negative number, got {}",
                self.sector_epsilon
            )));
        }
        if !self.band_tolerance_mm.is_finite() || self.band_tolerance_mm < 0.0 {
            return Err(Error::config(format!(
                "band_tolerance_mm must be a non-negative number, got {}",
                self.band_tolerance_mm
            )));
        }
        if self.function_id_digits == 0 {
            return Err(Error::config("function_id_digits must be at least 1"));
        }
        if self.skip_phrase.trim().is_empty() {
            return Err(Error::config("skip_phrase must not be empty"));
        }
        Ok(())
    }

    /// Front/back-of-house classifier for the configured id sets
    pub fn classifier(&self) -> AreaClassifier {
        AreaClassifier::new(
            self.front_of_house_ids.iter().copied(),
            self.back_of_house_ids.iter().copied(),
        )
    }
}

/// Names of the element parameters the validators read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterNames {
    pub room_name: String,
    pub room_number: String,
    pub room_function: String,
    pub door_mark: String,
    pub door_comments: String,
    pub type_comments: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            room_name: "Name".to_string(),
            room_number: "Number".to_string(),
            room_function: "GIFA NAME".to_string(),
            door_mark: "Mark".to_string(),
            door_comments: "Comments".to_string(),
            type_comments: "Type Comments".to_string(),
        }
    }
}

/// File names of the lookup tables, relative to the config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub door_direction_rules: String,
    pub function_map: String,
    pub level_map: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            door_direction_rules: "door_direction_rules.json".to_string(),
            function_map: "function_map.json".to_string(),
            level_map: "level_map.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::AreaCategory;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ValidatorConfig::from_toml("").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.parameters.room_function, "GIFA NAME");
        assert_eq!(config.tables.level_map, "level_map.json");
    }

    #[test]
    fn test_partial_override() {
        let config = ValidatorConfig::from_toml(
            r#"
            band_tolerance_mm = 2500.0
            reference_room_policy = "prefer_to"
            front_of_house_ids = [1]

            [parameters]
            room_function = "Department"
            "#,
        )
        .unwrap();
        assert_eq!(config.band_tolerance_mm, 2500.0);
        assert_eq!(config.reference_room_policy, ReferenceRoomPolicy::PreferTo);
        assert_eq!(config.parameters.room_function, "Department");
        assert_eq!(config.parameters.room_number, "Number");
        assert_eq!(config.classifier().classify(Some(5)), AreaCategory::Unassigned);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ValidatorConfig::from_toml("sector_epsilon = -1.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ValidatorConfig::from_toml("phase_names = []"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ValidatorConfig::from_toml("function_id_digits = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ValidatorConfig::from_toml("skip_phrase = 3"),
            Err(Error::Config(_))
        ));
    }
}
