// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document structure queries: phases, levels, scope boxes and views

use crate::{ElementId, LevelInfo, PhaseInfo, ScopeBoxInfo, ViewInfo};

/// Document query interface
///
/// # Example
///
/// ```ignore
/// use roomcheck_model::DocumentQuery;
///
/// fn summarize(query: &dyn DocumentQuery) {
///     for level in query.levels() {
///         println!("{} at {}", level.name, level.elevation);
///     }
///     let view = query.active_view();
///     println!("{} rooms in view", query.rooms_in_view(view).len());
/// }
/// ```
pub trait DocumentQuery {
    /// All phases in document order
    fn phases(&self) -> Vec<PhaseInfo>;

    /// All levels
    fn levels(&self) -> Vec<LevelInfo>;

    /// Level by ID
    fn level(&self, id: ElementId) -> Option<LevelInfo>;

    /// Level an element is hosted on
    fn level_of(&self, element: ElementId) -> Option<ElementId>;

    /// All scope boxes (instances only, no types)
    fn scope_boxes(&self) -> Vec<ScopeBoxInfo>;

    /// View by ID
    fn view(&self, id: ElementId) -> Option<ViewInfo>;

    /// The view the user is working in
    fn active_view(&self) -> ElementId;

    /// Room instances visible in a view
    fn rooms_in_view(&self, view: ElementId) -> Vec<ElementId>;

    /// Door instances visible in a view
    fn doors_in_view(&self, view: ElementId) -> Vec<ElementId>;

    /// Find a phase by case-insensitive name
    fn phase_named(&self, names: &[String]) -> Option<PhaseInfo> {
        self.phases().into_iter().find(|phase| {
            let lower = phase.name.trim().to_lowercase();
            !lower.is_empty() && names.iter().any(|n| n.to_lowercase() == lower)
        })
    }
}
