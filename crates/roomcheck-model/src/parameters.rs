// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named parameter access for elements

use crate::{ElementId, Result};
use serde::{Deserialize, Serialize};

/// A single named parameter
///
/// A parameter can exist on an element without carrying a value; hosts
/// distinguish "no such parameter" (`None` from the reader) from "parameter
/// present but empty" (`value: None`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Value rendered as a string
    pub value: Option<String>,
}

impl Parameter {
    /// Create a parameter holding a value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a parameter without a value
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Value as a string slice, empty when unset
    pub fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Parameter reader trait
///
/// # Example
///
/// ```ignore
/// use roomcheck_model::{ParameterReader, ElementId};
///
/// fn show_mark(params: &dyn ParameterReader, door: ElementId) -> roomcheck_model::Result<()> {
///     match params.parameter(door, "Mark")? {
///         Some(p) if p.has_value() => println!("Mark: {}", p.as_str()),
///         Some(_) => println!("Mark is empty"),
///         None => println!("No Mark parameter"),
///     }
///     Ok(())
/// }
/// ```
pub trait ParameterReader {
    /// Look up an instance parameter by name
    ///
    /// # Returns
    /// `Ok(None)` if the element has no such parameter, `Err` if the host
    /// raised while reading it
    fn parameter(&self, id: ElementId, name: &str) -> Result<Option<Parameter>>;

    /// Look up a parameter on the element's type (family symbol)
    ///
    /// Elements without a type return `Ok(None)`.
    fn type_parameter(&self, _id: ElementId, _name: &str) -> Result<Option<Parameter>> {
        Ok(None)
    }

    /// Element's display name
    fn name(&self, id: ElementId) -> Option<String>;

    /// Convenience: parameter value trimmed, if the parameter exists and has a value
    fn text(&self, id: ElementId, name: &str) -> Result<Option<String>> {
        Ok(self
            .parameter(id, name)?
            .and_then(|p| p.value)
            .map(|v| v.trim().to_string()))
    }
}
