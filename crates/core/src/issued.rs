//! The list of drawings issued on one issue sheet.
//!
//! Entries are keyed by drawing id: issuing a drawing that is already on the
//! sheet adds to its copy count. Each entry also has its own identifier, and
//! removal addresses that identifier rather than the drawing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::validate_copies;

/// One line of an issue sheet's drawing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedDrawing {
    pub entry_id: Uuid,
    pub drawing_id: DbId,
    pub copies: i32,
}

/// Issue `copies` of `drawing_id`.
///
/// Increments the existing entry for the drawing, or appends a new one.
/// Returns the identifier of the entry that now holds the drawing.
pub fn add_drawing(
    entries: &mut Vec<IssuedDrawing>,
    drawing_id: DbId,
    copies: i32,
) -> Result<Uuid, CoreError> {
    validate_copies(copies)?;

    if let Some(entry) = entries.iter_mut().find(|e| e.drawing_id == drawing_id) {
        entry.copies = entry.copies.checked_add(copies).ok_or_else(|| {
            CoreError::Validation(format!("copies overflow for drawing {drawing_id}"))
        })?;
        return Ok(entry.entry_id);
    }

    let entry_id = Uuid::now_v7();
    entries.push(IssuedDrawing {
        entry_id,
        drawing_id,
        copies,
    });
    Ok(entry_id)
}

/// Remove the entry with `entry_id`, returning it.
///
/// Fails with `NotFound` and leaves `entries` untouched when no entry matches.
pub fn remove_entry(
    entries: &mut Vec<IssuedDrawing>,
    entry_id: Uuid,
) -> Result<IssuedDrawing, CoreError> {
    let index = entries
        .iter()
        .position(|e| e.entry_id == entry_id)
        .ok_or_else(|| CoreError::not_found("IssuedDrawing", entry_id))?;
    Ok(entries.remove(index))
}

/// Build an entry list from `(drawing_id, copies)` pairs, merging repeats.
pub fn collect_drawings(
    requested: impl IntoIterator<Item = (DbId, i32)>,
) -> Result<Vec<IssuedDrawing>, CoreError> {
    let mut entries = Vec::new();
    for (drawing_id, copies) in requested {
        add_drawing(&mut entries, drawing_id, copies)?;
    }
    Ok(entries)
}
