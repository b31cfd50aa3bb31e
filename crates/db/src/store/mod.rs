//! Storage seam.
//!
//! Every operation the services and handlers need is declared on a
//! per-entity trait; [`Store`] combines them so the application can hold a
//! single `Arc<dyn Store>`. [`postgres::PgStore`] is the production
//! implementation and [`memory::MemoryStore`] keeps everything in process.
//!
//! Reference arrays (`Category::drawing_ids`, `Register::category_ids`) are
//! only ever changed through the attach / detach methods, each of which is a
//! single atomic step in both implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use drawreg_core::issued::IssuedDrawing;
use drawreg_core::references::RefPosition;
use drawreg_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};
use crate::models::issue_sheet::{CreateIssueSheet, IssueSheet, UpdateIssueSheet};
use crate::models::register::{CreateRegister, Register, UpdateRegister};
use crate::models::user::{CreateUser, UpdateUser, User};

/// The issue-sheet counter.
///
/// Only create-if-absent and increment-and-fetch are exposed; there is no way
/// to read or overwrite the raw value.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Create the counter with its initial value if it does not exist yet.
    /// Calling this again never resets an existing counter.
    async fn ensure_counter(&self) -> StoreResult<()>;

    /// Atomically increment the counter and return the new value.
    ///
    /// Fails with `CoreError::NotInitialized` if the counter was never
    /// created.
    async fn allocate_next(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait DrawingStore: Send + Sync {
    async fn create_drawing(&self, input: &CreateDrawing) -> StoreResult<Drawing>;
    async fn find_drawing(&self, id: DbId) -> StoreResult<Option<Drawing>>;
    /// Fetch every existing drawing among `ids`, in no particular order.
    async fn find_drawings(&self, ids: &[DbId]) -> StoreResult<Vec<Drawing>>;
    async fn update_drawing(&self, id: DbId, input: &UpdateDrawing)
        -> StoreResult<Option<Drawing>>;
    async fn delete_drawing(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category>;
    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>>;
    /// Fetch every existing category among `ids`, in no particular order.
    async fn find_categories(&self, ids: &[DbId]) -> StoreResult<Vec<Category>>;
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>>;
    /// Append `drawing_id` to the category's drawing list.
    /// Returns `None` if the category does not exist.
    async fn attach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>>;
    /// Remove `drawing_id` from the category's drawing list.
    /// Returns `None` if the category does not exist.
    async fn detach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>>;
    async fn delete_category(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait RegisterStore: Send + Sync {
    /// Insert a register referencing `category_ids`. `input.categories` is
    /// ignored; resolving inline categories is the caller's job.
    async fn create_register(
        &self,
        input: &CreateRegister,
        category_ids: &[DbId],
    ) -> StoreResult<Register>;
    async fn find_register(&self, id: DbId) -> StoreResult<Option<Register>>;
    async fn list_registers(&self) -> StoreResult<Vec<Register>>;
    async fn list_registers_by_project(&self, project_number: i64) -> StoreResult<Vec<Register>>;
    /// Registers whose category list contains `category_id`.
    async fn list_registers_referencing(&self, category_id: DbId) -> StoreResult<Vec<Register>>;
    /// Apply the scalar fields of `input`. `input.categories` is ignored.
    async fn update_register(
        &self,
        id: DbId,
        input: &UpdateRegister,
    ) -> StoreResult<Option<Register>>;
    async fn attach_category_refs(
        &self,
        register_id: DbId,
        category_ids: &[DbId],
        position: RefPosition,
    ) -> StoreResult<Option<Register>>;
    async fn detach_category_ref(
        &self,
        register_id: DbId,
        category_id: DbId,
    ) -> StoreResult<Option<Register>>;
    async fn delete_register(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait IssueSheetStore: Send + Sync {
    /// Insert an issue sheet with an already-allocated `sequence_number`.
    /// `input.drawings` is ignored in favour of `issued`.
    async fn create_issue_sheet(
        &self,
        sequence_number: i64,
        input: &CreateIssueSheet,
        issued: &[IssuedDrawing],
    ) -> StoreResult<IssueSheet>;
    async fn find_issue_sheet(&self, id: DbId) -> StoreResult<Option<IssueSheet>>;
    async fn list_issue_sheets(&self) -> StoreResult<Vec<IssueSheet>>;
    async fn update_issue_sheet(
        &self,
        id: DbId,
        input: &UpdateIssueSheet,
    ) -> StoreResult<Option<IssueSheet>>;
    /// Replace the issued-drawing list (last write wins).
    async fn set_issued_drawings(
        &self,
        id: DbId,
        issued: &[IssuedDrawing],
    ) -> StoreResult<Option<IssueSheet>>;
    async fn delete_issue_sheet(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a conflict if the e-mail address is already taken.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: DbId) -> StoreResult<bool>;
}

/// Everything the application needs from persistence.
#[async_trait]
pub trait Store:
    SequenceStore + DrawingStore + CategoryStore + RegisterStore + IssueSheetStore + UserStore
{
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
