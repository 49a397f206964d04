// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for host document access

use crate::ElementId;
use thiserror::Error;

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors a host can raise while answering a query
#[derive(Error, Debug)]
pub enum HostError {
    /// Element not found
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    /// Reading a parameter raised inside the host
    #[error("Failed to read parameter '{name}' on element {element}: {message}")]
    ParameterAccess {
        element: ElementId,
        name: String,
        message: String,
    },

    /// Phase-aware room lookup failed
    #[error("Adjacency query failed for element {element}: {message}")]
    Adjacency { element: ElementId, message: String },

    /// The document is structurally inconsistent
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    /// Create a new invalid document error
    pub fn invalid(msg: impl Into<String>) -> Self {
        HostError::InvalidDocument(msg.into())
    }

    /// Create a new parameter access error
    pub fn parameter(element: ElementId, name: impl Into<String>, msg: impl Into<String>) -> Self {
        HostError::ParameterAccess {
            element,
            name: name.into(),
            message: msg.into(),
        }
    }

    /// Create a new adjacency error
    pub fn adjacency(element: ElementId, msg: impl Into<String>) -> Self {
        HostError::Adjacency {
            element,
            message: msg.into(),
        }
    }
}
