// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roomcheck Snapshot - Exported building documents as a host
//!
//! This crate loads a JSON snapshot exported from a CAD host (rooms, doors,
//! levels, phases, scope boxes and views with their parameters and geometry)
//! and implements the traits defined in `roomcheck-model` on top of it, so the
//! numbering rules can run outside the host.
//!
//! # Features
//!
//! - **Referential checks on load** - dangling level, type, phase, room and
//!   scope box references are rejected up front
//! - **Hash-indexed lookups** using `rustc-hash`
//! - **Host semantics preserved** - absent parameters, present-but-empty
//!   parameters and phase-scoped door adjacency behave as in the host
//!
//! # Example
//!
//! ```ignore
//! use roomcheck_snapshot::DocumentSnapshot;
//! use roomcheck_model::HostDocument;
//!
//! let doc = roomcheck_snapshot::load_path("tower-l2.json")?;
//! let view = doc.query().active_view();
//! println!("{} rooms in view", doc.query().rooms_in_view(view).len());
//! ```

mod adjacency;
mod geometry;
mod model;
mod parameters;
pub mod records;
mod structure;

pub use model::DocumentSnapshot;
pub use records::SnapshotFile;

use roomcheck_model::Result;
use std::path::Path;

/// Parse a snapshot from a JSON string
pub fn load(content: &str) -> Result<DocumentSnapshot> {
    DocumentSnapshot::parse(content)
}

/// Read and parse a snapshot file
pub fn load_path(path: impl AsRef<Path>) -> Result<DocumentSnapshot> {
    let path = path.as_ref();
    log::info!("loading snapshot {}", path.display());
    let content = std::fs::read_to_string(path)?;
    DocumentSnapshot::parse(&content)
}
