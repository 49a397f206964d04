// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for validation runs
//!
//! Only run-level failures live here. Problems with a single room or door
//! never become an `Error`; they are recorded as an `ElementIssue` and the
//! run carries on.

use roomcheck_model::ElementId;
use thiserror::Error;

/// Validation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Run-level validation errors
#[derive(Error, Debug)]
pub enum Error {
    /// None of the configured phase names exist in the document
    #[error("Could not find a phase named {0:?} in the document")]
    PhaseNotFound(Vec<String>),

    /// The view to validate does not exist
    #[error("View {0} not found")]
    ViewNotFound(ElementId),

    /// A configuration table could not be read
    #[error("Table error in {source_name}: {message}")]
    Table {
        source_name: String,
        message: String,
    },

    /// Invalid run configuration
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a table error
    pub fn table(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Table {
            source_name: source_name.into(),
            message: msg.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
