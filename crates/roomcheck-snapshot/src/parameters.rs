// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParameterReader trait implementation

use crate::records::ParameterMap;
use roomcheck_model::{ElementId, HostError, Parameter, ParameterReader, Result};
use rustc_hash::FxHashMap;

/// Parameters of one element, already converted to strings
#[derive(Debug, Default)]
struct ElementParameters {
    name: Option<String>,
    type_id: Option<ElementId>,
    values: FxHashMap<String, Option<String>>,
}

/// Parameter reader implementation
#[derive(Debug, Default)]
pub struct ParameterStore {
    elements: FxHashMap<ElementId, ElementParameters>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element's parameters
    ///
    /// Scalar JSON values are rendered to strings; arrays and objects are
    /// rejected because no host parameter can hold them.
    pub fn insert(
        &mut self,
        id: ElementId,
        name: Option<String>,
        type_id: Option<ElementId>,
        parameters: &ParameterMap,
    ) -> Result<()> {
        let mut values = FxHashMap::default();
        for (key, value) in parameters {
            values.insert(key.clone(), render_value(id, key, value)?);
        }
        // Fall back to the "Name" parameter for the display name
        let name = name.or_else(|| values.get("Name").cloned().flatten());
        self.elements.insert(
            id,
            ElementParameters {
                name,
                type_id,
                values,
            },
        );
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Type assigned to an element
    pub fn type_of(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.type_id)
    }
}

fn render_value(id: ElementId, key: &str, value: &serde_json::Value) -> Result<Option<String>> {
    use serde_json::Value;
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(if *b { "1" } else { "0" }.to_string())),
        Value::Array(_) | Value::Object(_) => Err(HostError::invalid(format!(
            "parameter '{key}' on element {id} is not a scalar"
        ))),
    }
}

impl ParameterReader for ParameterStore {
    fn parameter(&self, id: ElementId, name: &str) -> Result<Option<Parameter>> {
        let element = self
            .elements
            .get(&id)
            .ok_or(HostError::ElementNotFound(id))?;
        Ok(element.values.get(name).map(|value| Parameter {
            name: name.to_string(),
            value: value.clone(),
        }))
    }

    fn type_parameter(&self, id: ElementId, name: &str) -> Result<Option<Parameter>> {
        match self.type_of(id) {
            Some(type_id) => self.parameter(type_id, name),
            None => Ok(None),
        }
    }

    fn name(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).and_then(|e| e.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> ParameterStore {
        let mut store = ParameterStore::new();
        let door_type: ParameterMap = serde_json::from_value(json!({
            "Type Comments": "Not for door schedule"
        }))
        .unwrap();
        store
            .insert(ElementId(50), Some("Single Flush".into()), None, &door_type)
            .unwrap();

        let door: ParameterMap = serde_json::from_value(json!({
            "Mark": "L2-1001-01A",
            "Comments": null,
            "Width": 900,
            "Fire Rated": true
        }))
        .unwrap();
        store
            .insert(ElementId(51), None, Some(ElementId(50)), &door)
            .unwrap();
        store
    }

    #[test]
    fn test_present_absent_and_empty() {
        let store = store();
        let mark = store.parameter(ElementId(51), "Mark").unwrap().unwrap();
        assert_eq!(mark.as_str(), "L2-1001-01A");

        let comments = store.parameter(ElementId(51), "Comments").unwrap().unwrap();
        assert!(!comments.has_value());

        assert!(store.parameter(ElementId(51), "Fire Rating").unwrap().is_none());
        assert_eq!(store.text(ElementId(51), "Width").unwrap().as_deref(), Some("900"));
        assert_eq!(store.text(ElementId(51), "Fire Rated").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_type_parameter() {
        let store = store();
        let comments = store
            .type_parameter(ElementId(51), "Type Comments")
            .unwrap()
            .unwrap();
        assert_eq!(comments.as_str(), "Not for door schedule");
        assert!(store.type_parameter(ElementId(50), "Type Comments").unwrap().is_none());
    }

    #[test]
    fn test_unknown_element_is_error() {
        let store = store();
        assert!(matches!(
            store.parameter(ElementId(999), "Mark"),
            Err(HostError::ElementNotFound(ElementId(999)))
        ));
    }

    #[test]
    fn test_non_scalar_rejected() {
        let mut store = ParameterStore::new();
        let params: ParameterMap = serde_json::from_value(json!({ "Bad": [1, 2] })).unwrap();
        assert!(store.insert(ElementId(1), None, None, &params).is_err());
    }
}
