// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core document trait
//!
//! Ties the query sub-traits together into one handle on an open document.

use crate::{AdjacencyQuery, DocumentMetadata, DocumentQuery, GeometryQuery, ParameterReader};

/// Read-only access to an open building document
///
/// This trait provides access to the various aspects of a document through
/// sub-traits that handle specific concerns (parameters, geometry, adjacency,
/// document structure). Validation runs single-threaded against a live host,
/// so no `Send`/`Sync` bound is imposed.
pub trait HostDocument {
    /// Parameter lookups by name
    fn parameters(&self) -> &dyn ParameterReader;

    /// Bounding boxes and placements
    fn geometry(&self) -> &dyn GeometryQuery;

    /// Phase-aware door/room adjacency
    fn adjacency(&self) -> &dyn AdjacencyQuery;

    /// Phases, levels, scope boxes and views
    fn query(&self) -> &dyn DocumentQuery;

    /// Document metadata (title, length unit)
    fn metadata(&self) -> &DocumentMetadata;
}
