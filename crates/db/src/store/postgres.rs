//! PostgreSQL-backed [`Store`](super::Store).

use async_trait::async_trait;
use drawreg_core::error::CoreError;
use drawreg_core::issued::IssuedDrawing;
use drawreg_core::references::RefPosition;
use drawreg_core::types::DbId;
use sqlx::PgPool;

use super::{
    CategoryStore, DrawingStore, IssueSheetStore, RegisterStore, SequenceStore, Store, UserStore,
};
use crate::error::StoreResult;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};
use crate::models::issue_sheet::{CreateIssueSheet, IssueSheet, UpdateIssueSheet};
use crate::models::register::{CreateRegister, Register, UpdateRegister};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::{
    CategoryRepo, CounterRepo, DrawingRepo, IssueSheetRepo, RegisterRepo, UserRepo,
};

/// Delegates every operation to the static repositories over one pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for PgStore {
    async fn ensure_counter(&self) -> StoreResult<()> {
        if CounterRepo::ensure(&self.pool).await? {
            tracing::info!("Issue sheet counter created");
        }
        Ok(())
    }

    async fn allocate_next(&self) -> StoreResult<i64> {
        let value = CounterRepo::increment(&self.pool)
            .await?
            .ok_or(CoreError::NotInitialized("issue sheet counter"))?;
        tracing::debug!(sequence_number = value, "Allocated sequence number");
        Ok(value)
    }
}

#[async_trait]
impl DrawingStore for PgStore {
    async fn create_drawing(&self, input: &CreateDrawing) -> StoreResult<Drawing> {
        Ok(DrawingRepo::create(&self.pool, input).await?)
    }

    async fn find_drawing(&self, id: DbId) -> StoreResult<Option<Drawing>> {
        Ok(DrawingRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_drawings(&self, ids: &[DbId]) -> StoreResult<Vec<Drawing>> {
        Ok(DrawingRepo::find_by_ids(&self.pool, ids).await?)
    }

    async fn update_drawing(
        &self,
        id: DbId,
        input: &UpdateDrawing,
    ) -> StoreResult<Option<Drawing>> {
        Ok(DrawingRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_drawing(&self, id: DbId) -> StoreResult<bool> {
        Ok(DrawingRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        Ok(CategoryRepo::create(&self.pool, input).await?)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_categories(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::find_by_ids(&self.pool, ids).await?)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::update(&self.pool, id, input).await?)
    }

    async fn attach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::push_drawing(&self.pool, category_id, drawing_id).await?)
    }

    async fn detach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::pull_drawing(&self.pool, category_id, drawing_id).await?)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl RegisterStore for PgStore {
    async fn create_register(
        &self,
        input: &CreateRegister,
        category_ids: &[DbId],
    ) -> StoreResult<Register> {
        Ok(RegisterRepo::create(&self.pool, input, category_ids).await?)
    }

    async fn find_register(&self, id: DbId) -> StoreResult<Option<Register>> {
        Ok(RegisterRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_registers(&self) -> StoreResult<Vec<Register>> {
        Ok(RegisterRepo::list(&self.pool).await?)
    }

    async fn list_registers_by_project(&self, project_number: i64) -> StoreResult<Vec<Register>> {
        Ok(RegisterRepo::list_by_project_number(&self.pool, project_number).await?)
    }

    async fn list_registers_referencing(&self, category_id: DbId) -> StoreResult<Vec<Register>> {
        Ok(RegisterRepo::list_referencing_category(&self.pool, category_id).await?)
    }

    async fn update_register(
        &self,
        id: DbId,
        input: &UpdateRegister,
    ) -> StoreResult<Option<Register>> {
        Ok(RegisterRepo::update(&self.pool, id, input).await?)
    }

    async fn attach_category_refs(
        &self,
        register_id: DbId,
        category_ids: &[DbId],
        position: RefPosition,
    ) -> StoreResult<Option<Register>> {
        Ok(RegisterRepo::attach_categories(&self.pool, register_id, category_ids, position).await?)
    }

    async fn detach_category_ref(
        &self,
        register_id: DbId,
        category_id: DbId,
    ) -> StoreResult<Option<Register>> {
        Ok(RegisterRepo::pull_category(&self.pool, register_id, category_id).await?)
    }

    async fn delete_register(&self, id: DbId) -> StoreResult<bool> {
        Ok(RegisterRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl IssueSheetStore for PgStore {
    async fn create_issue_sheet(
        &self,
        sequence_number: i64,
        input: &CreateIssueSheet,
        issued: &[IssuedDrawing],
    ) -> StoreResult<IssueSheet> {
        Ok(IssueSheetRepo::create(&self.pool, sequence_number, input, issued).await?)
    }

    async fn find_issue_sheet(&self, id: DbId) -> StoreResult<Option<IssueSheet>> {
        Ok(IssueSheetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_issue_sheets(&self) -> StoreResult<Vec<IssueSheet>> {
        Ok(IssueSheetRepo::list(&self.pool).await?)
    }

    async fn update_issue_sheet(
        &self,
        id: DbId,
        input: &UpdateIssueSheet,
    ) -> StoreResult<Option<IssueSheet>> {
        Ok(IssueSheetRepo::update(&self.pool, id, input).await?)
    }

    async fn set_issued_drawings(
        &self,
        id: DbId,
        issued: &[IssuedDrawing],
    ) -> StoreResult<Option<IssueSheet>> {
        Ok(IssueSheetRepo::set_issued_drawings(&self.pool, id, issued).await?)
    }

    async fn delete_issue_sheet(&self, id: DbId) -> StoreResult<bool> {
        Ok(IssueSheetRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<bool> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
