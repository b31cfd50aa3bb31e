//! Issue sheet entity model and DTOs.

use chrono::Utc;
use drawreg_core::issued::IssuedDrawing;
use drawreg_core::media::MediaKind;
use drawreg_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::drawing::Drawing;

/// Who signed an issue sheet off (issuer or receiver), and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signoff {
    #[serde(default)]
    pub name: String,
    /// Signature image as a data URL.
    #[serde(default)]
    pub signature: String,
    #[serde(default = "chrono::Utc::now")]
    pub date: Timestamp,
}

impl Default for Signoff {
    fn default() -> Self {
        Self {
            name: String::new(),
            signature: String::new(),
            date: Utc::now(),
        }
    }
}

/// An issue sheet row from the `issue_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IssueSheet {
    pub id: DbId,
    /// Allocated from the issue-sheet counter; never client-supplied.
    pub sequence_number: i64,
    pub recipient: String,
    pub attention_to: String,
    pub client: String,
    pub project_name: String,
    pub project_number: Option<i64>,
    #[sqlx(json)]
    pub issued_drawings: Vec<IssuedDrawing>,
    pub remarks: String,
    pub purpose: String,
    #[sqlx(try_from = "String")]
    pub media: MediaKind,
    #[sqlx(json)]
    pub issued_by: Signoff,
    #[sqlx(json)]
    pub received_by: Signoff,
    pub is_saved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A drawing to put on an issue sheet.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IssueDrawingRequest {
    pub drawing_id: DbId,
    pub copies: i32,
}

/// DTO for creating an issue sheet. Any `sequence_number` in the request
/// body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIssueSheet {
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub attention_to: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub project_name: String,
    pub project_number: Option<i64>,
    #[serde(default)]
    pub drawings: Vec<IssueDrawingRequest>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub purpose: String,
    pub media: MediaKind,
    #[serde(default)]
    pub issued_by: Signoff,
    #[serde(default)]
    pub received_by: Signoff,
    #[serde(default)]
    pub is_saved: bool,
}

/// DTO for updating an issue sheet. All fields are optional; the sequence
/// number and the drawing list cannot be changed here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssueSheet {
    pub recipient: Option<String>,
    pub attention_to: Option<String>,
    pub client: Option<String>,
    pub project_name: Option<String>,
    pub project_number: Option<i64>,
    pub remarks: Option<String>,
    pub purpose: Option<String>,
    pub media: Option<MediaKind>,
    pub issued_by: Option<Signoff>,
    pub received_by: Option<Signoff>,
    pub is_saved: Option<bool>,
}

/// An issued-drawing entry with its drawing resolved. `drawing` is `None`
/// when the referenced drawing no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct PopulatedIssuedDrawing {
    pub entry_id: Uuid,
    pub copies: i32,
    pub drawing: Option<Drawing>,
}

/// An issue sheet with its drawing list resolved.
#[derive(Debug, Clone, Serialize)]
pub struct IssueSheetWithDrawings {
    #[serde(flatten)]
    pub issue_sheet: IssueSheet,
    pub drawings: Vec<PopulatedIssuedDrawing>,
}
