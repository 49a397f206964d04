// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roomcheck Model - Trait definitions and shared types for numbering checks
//!
//! This crate provides the abstractions the room and door numbering rules are
//! written against. A CAD host (or an exported snapshot of one) implements the
//! traits, and the validator only ever talks to the host through them.
//!
//! # Architecture
//!
//! The crate is organized around several narrow traits:
//!
//! - [`HostDocument`] - Read-only access to an open building document
//! - [`ParameterReader`] - Named parameter lookup on elements and their types
//! - [`GeometryQuery`] - Bounding boxes and location points/curves
//! - [`AdjacencyQuery`] - Phase-aware from/to room lookup for doors
//! - [`DocumentQuery`] - Phases, levels, scope boxes, views and view contents
//!
//! # Example
//!
//! ```ignore
//! use roomcheck_model::{HostDocument, RoomSide};
//!
//! let doc: &dyn HostDocument = open_document();
//! let view = doc.query().active_view();
//! for door in doc.query().doors_in_view(view) {
//!     let from = doc.adjacency().adjoining_room(door, phase, RoomSide::From)?;
//!     println!("{door} opens from {from:?}");
//! }
//! ```

pub mod adjacency;
pub mod document;
pub mod error;
pub mod geometry;
pub mod parameters;
pub mod traits;
pub mod types;

// Re-export all public types
pub use adjacency::*;
pub use document::*;
pub use error::*;
pub use geometry::*;
pub use parameters::*;
pub use traits::*;
pub use types::*;
