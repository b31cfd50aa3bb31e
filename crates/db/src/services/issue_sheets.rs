//! Issue sheet numbering and drawing list.

use std::collections::HashMap;

use drawreg_core::error::CoreError;
use drawreg_core::issued::{self, IssuedDrawing};
use drawreg_core::types::DbId;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::drawing::Drawing;
use crate::models::issue_sheet::{
    CreateIssueSheet, IssueSheet, IssueSheetWithDrawings, PopulatedIssuedDrawing,
    UpdateIssueSheet,
};
use crate::store::{DrawingStore, IssueSheetStore, SequenceStore};
use crate::Store;

/// Fail with `NotFound` for the first id in `ids` that has no drawing.
async fn require_drawings(store: &dyn Store, ids: &[DbId]) -> StoreResult<()> {
    let found: Vec<DbId> = store.find_drawings(ids).await?.iter().map(|d| d.id).collect();
    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(CoreError::not_found("Drawing", missing).into()),
        None => Ok(()),
    }
}

async fn require_issue_sheet(store: &dyn Store, id: DbId) -> StoreResult<IssueSheet> {
    store
        .find_issue_sheet(id)
        .await?
        .ok_or_else(|| CoreError::not_found("IssueSheet", id).into())
}

/// Resolve the drawing entries of several issue sheets with one fetch.
pub async fn populate_issue_sheets(
    store: &dyn Store,
    sheets: Vec<IssueSheet>,
) -> StoreResult<Vec<IssueSheetWithDrawings>> {
    let drawing_ids: Vec<DbId> = sheets
        .iter()
        .flat_map(|s| s.issued_drawings.iter().map(|e| e.drawing_id))
        .collect();
    let by_id: HashMap<DbId, Drawing> = store
        .find_drawings(&drawing_ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    Ok(sheets
        .into_iter()
        .map(|issue_sheet| {
            let drawings = issue_sheet
                .issued_drawings
                .iter()
                .map(|entry| PopulatedIssuedDrawing {
                    entry_id: entry.entry_id,
                    copies: entry.copies,
                    drawing: by_id.get(&entry.drawing_id).cloned(),
                })
                .collect();
            IssueSheetWithDrawings {
                issue_sheet,
                drawings,
            }
        })
        .collect())
}

pub async fn get_issue_sheet(store: &dyn Store, id: DbId) -> StoreResult<IssueSheetWithDrawings> {
    let sheet = require_issue_sheet(store, id).await?;
    let mut populated = populate_issue_sheets(store, vec![sheet]).await?;
    populated
        .pop()
        .ok_or_else(|| CoreError::Internal("populated issue sheet missing".into()).into())
}

pub async fn list_issue_sheets(store: &dyn Store) -> StoreResult<Vec<IssueSheetWithDrawings>> {
    let sheets = store.list_issue_sheets().await?;
    populate_issue_sheets(store, sheets).await
}

/// Create an issue sheet under the next sequence number.
///
/// The request is checked before a number is allocated, so rejected
/// requests do not consume numbers. Once allocated, a number is never handed
/// out again even if the insert fails.
pub async fn create_issue_sheet(
    store: &dyn Store,
    input: &CreateIssueSheet,
) -> StoreResult<IssueSheet> {
    let entries = issued::collect_drawings(input.drawings.iter().map(|d| (d.drawing_id, d.copies)))?;
    let drawing_ids: Vec<DbId> = entries.iter().map(|e| e.drawing_id).collect();
    require_drawings(store, &drawing_ids).await?;

    let sequence_number = store.allocate_next().await?;
    let sheet = store
        .create_issue_sheet(sequence_number, input, &entries)
        .await?;

    tracing::info!(
        issue_sheet_id = sheet.id,
        sequence_number,
        drawings = entries.len(),
        "Issue sheet created"
    );
    Ok(sheet)
}

pub async fn update_issue_sheet(
    store: &dyn Store,
    id: DbId,
    input: &UpdateIssueSheet,
) -> StoreResult<IssueSheet> {
    let sheet = store
        .update_issue_sheet(id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("IssueSheet", id))?;
    tracing::info!(issue_sheet_id = id, "Issue sheet updated");
    Ok(sheet)
}

pub async fn delete_issue_sheet(store: &dyn Store, id: DbId) -> StoreResult<()> {
    if !store.delete_issue_sheet(id).await? {
        return Err(CoreError::not_found("IssueSheet", id).into());
    }
    tracing::info!(issue_sheet_id = id, "Issue sheet deleted");
    Ok(())
}

/// Issue `copies` of a drawing on the sheet, merging with an existing entry
/// for the same drawing.
pub async fn add_drawing(
    store: &dyn Store,
    issue_sheet_id: DbId,
    drawing_id: DbId,
    copies: i32,
) -> StoreResult<IssueSheet> {
    let sheet = require_issue_sheet(store, issue_sheet_id).await?;
    require_drawings(store, &[drawing_id]).await?;

    let mut entries: Vec<IssuedDrawing> = sheet.issued_drawings;
    let entry_id = issued::add_drawing(&mut entries, drawing_id, copies)?;

    let sheet = store
        .set_issued_drawings(issue_sheet_id, &entries)
        .await?
        .ok_or_else(|| CoreError::not_found("IssueSheet", issue_sheet_id))?;

    tracing::info!(
        issue_sheet_id,
        drawing_id,
        copies,
        entry_id = %entry_id,
        "Drawing issued"
    );
    Ok(sheet)
}

/// Remove one entry from the sheet's drawing list by its entry id.
pub async fn remove_drawing(
    store: &dyn Store,
    issue_sheet_id: DbId,
    entry_id: Uuid,
) -> StoreResult<IssueSheet> {
    let sheet = require_issue_sheet(store, issue_sheet_id).await?;

    let mut entries = sheet.issued_drawings;
    let removed = issued::remove_entry(&mut entries, entry_id)?;

    let sheet = store
        .set_issued_drawings(issue_sheet_id, &entries)
        .await?
        .ok_or_else(|| CoreError::not_found("IssueSheet", issue_sheet_id))?;

    tracing::info!(
        issue_sheet_id,
        drawing_id = removed.drawing_id,
        entry_id = %entry_id,
        "Issued drawing removed"
    );
    Ok(sheet)
}
