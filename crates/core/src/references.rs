//! Identifier-list ("reference array") operations.
//!
//! Categories hold an ordered list of drawing ids and registers an ordered
//! list of category ids. The storage layer enforces nothing about these
//! lists; the functions here are the single definition of how they change.

use std::collections::HashMap;

use crate::types::DbId;

/// Where newly attached identifiers go relative to the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPosition {
    /// Before every existing identifier (register update with inline categories).
    Front,
    /// After every existing identifier (add drawing, add categories).
    Back,
}

/// Attach `ids` to `list` at `position`, keeping the order of `ids`.
pub fn attach(list: &mut Vec<DbId>, ids: &[DbId], position: RefPosition) {
    match position {
        RefPosition::Front => {
            list.splice(0..0, ids.iter().copied());
        }
        RefPosition::Back => list.extend_from_slice(ids),
    }
}

/// Remove every occurrence of `id` from `list`.
///
/// Returns `false` (and leaves `list` untouched) when `id` was not present.
pub fn detach(list: &mut Vec<DbId>, id: DbId) -> bool {
    let before = list.len();
    list.retain(|existing| *existing != id);
    list.len() != before
}

/// Order `found` documents by their position in `ids`.
///
/// Identifiers with no matching document are skipped: a dangling reference
/// resolves to nothing rather than to an error.
pub fn resolve_in_order<T>(ids: &[DbId], found: Vec<T>, id_of: impl Fn(&T) -> DbId) -> Vec<T> {
    let mut by_id: HashMap<DbId, T> = found.into_iter().map(|doc| (id_of(&doc), doc)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
