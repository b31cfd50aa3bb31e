//! In-process [`Store`](super::Store) used by tests and the `memory` storage
//! backend.
//!
//! All tables sit behind one [`RwLock`], so every method is atomic with
//! respect to every other. Ids are assigned per table starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use drawreg_core::error::CoreError;
use drawreg_core::issued::IssuedDrawing;
use drawreg_core::references::{self, RefPosition};
use drawreg_core::roles::DEFAULT_ROLE;
use drawreg_core::types::DbId;
use tokio::sync::RwLock;

use super::{
    CategoryStore, DrawingStore, IssueSheetStore, RegisterStore, SequenceStore, Store, UserStore,
};
use crate::error::StoreResult;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};
use crate::models::issue_sheet::{CreateIssueSheet, IssueSheet, UpdateIssueSheet};
use crate::models::register::{CreateRegister, Register, UpdateRegister};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::counter_repo::INITIAL_SEQUENCE_VALUE;

const UQ_USERS_EMAIL: &str = "uq_users_email";
const UQ_ISSUE_SHEETS_SEQUENCE_NUMBER: &str = "uq_issue_sheets_sequence_number";

struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: DbId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn get_many(&self, ids: &[DbId]) -> Vec<T> {
        ids.iter().filter_map(|id| self.rows.get(id).cloned()).collect()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    /// Apply `change` to the row and return the updated copy.
    fn modify(&mut self, id: DbId, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    fn remove(&mut self, id: DbId) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    /// `None` until [`SequenceStore::ensure_counter`] runs.
    counter: Option<i64>,
    drawings: Table<Drawing>,
    categories: Table<Category>,
    registers: Table<Register>,
    issue_sheets: Table<IssueSheet>,
    users: Table<User>,
}

fn unique_violation(constraint: &str) -> CoreError {
    CoreError::Conflict(format!(
        "Duplicate value violates unique constraint: {constraint}"
    ))
}

fn set<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Keeps every table in memory. Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// An empty store. The issue-sheet counter does not exist until
    /// [`SequenceStore::ensure_counter`] is called.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn ensure_counter(&self) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.counter.is_none() {
            tables.counter = Some(INITIAL_SEQUENCE_VALUE);
            tracing::info!("Issue sheet counter created");
        }
        Ok(())
    }

    async fn allocate_next(&self) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        let counter = tables
            .counter
            .as_mut()
            .ok_or(CoreError::NotInitialized("issue sheet counter"))?;
        *counter += 1;
        Ok(*counter)
    }
}

#[async_trait]
impl DrawingStore for MemoryStore {
    async fn create_drawing(&self, input: &CreateDrawing) -> StoreResult<Drawing> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let drawing = Drawing {
            id: tables.drawings.next_id(),
            number: input.number.clone(),
            project_number: input.project_number.clone(),
            description: input.description.clone(),
            title: input.title.clone(),
            size: input.size.clone(),
            revision_count: input.revision_count.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        tables.drawings.rows.insert(drawing.id, drawing.clone());
        Ok(drawing)
    }

    async fn find_drawing(&self, id: DbId) -> StoreResult<Option<Drawing>> {
        Ok(self.tables.read().await.drawings.get(id))
    }

    async fn find_drawings(&self, ids: &[DbId]) -> StoreResult<Vec<Drawing>> {
        Ok(self.tables.read().await.drawings.get_many(ids))
    }

    async fn update_drawing(
        &self,
        id: DbId,
        input: &UpdateDrawing,
    ) -> StoreResult<Option<Drawing>> {
        let mut tables = self.tables.write().await;
        Ok(tables.drawings.modify(id, |d| {
            set(&mut d.number, &input.number);
            set(&mut d.project_number, &input.project_number);
            set(&mut d.description, &input.description);
            set(&mut d.title, &input.title);
            set(&mut d.size, &input.size);
            set(&mut d.revision_count, &input.revision_count);
            d.updated_at = Utc::now();
        }))
    }

    async fn delete_drawing(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.drawings.remove(id))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let category = Category {
            id: tables.categories.next_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            drawing_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.rows.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(id))
    }

    async fn find_categories(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.get_many(ids))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.all())
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.modify(id, |c| {
            set(&mut c.title, &input.title);
            set(&mut c.description, &input.description);
            c.updated_at = Utc::now();
        }))
    }

    async fn attach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.modify(category_id, |c| {
            references::attach(&mut c.drawing_ids, &[drawing_id], RefPosition::Back);
            c.updated_at = Utc::now();
        }))
    }

    async fn detach_drawing_ref(
        &self,
        category_id: DbId,
        drawing_id: DbId,
    ) -> StoreResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.modify(category_id, |c| {
            if references::detach(&mut c.drawing_ids, drawing_id) {
                c.updated_at = Utc::now();
            }
        }))
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.categories.remove(id))
    }
}

#[async_trait]
impl RegisterStore for MemoryStore {
    async fn create_register(
        &self,
        input: &CreateRegister,
        category_ids: &[DbId],
    ) -> StoreResult<Register> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let register = Register {
            id: tables.registers.next_id(),
            project_name: input.project_name.clone(),
            project_number: input.project_number,
            discipline: input.discipline.clone(),
            engineers: input.engineers.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            category_ids: category_ids.to_vec(),
            created_at: now,
            updated_at: now,
        };
        tables.registers.rows.insert(register.id, register.clone());
        Ok(register)
    }

    async fn find_register(&self, id: DbId) -> StoreResult<Option<Register>> {
        Ok(self.tables.read().await.registers.get(id))
    }

    async fn list_registers(&self) -> StoreResult<Vec<Register>> {
        Ok(self.tables.read().await.registers.all())
    }

    async fn list_registers_by_project(&self, project_number: i64) -> StoreResult<Vec<Register>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registers
            .rows
            .values()
            .filter(|r| r.project_number == project_number)
            .cloned()
            .collect())
    }

    async fn list_registers_referencing(&self, category_id: DbId) -> StoreResult<Vec<Register>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registers
            .rows
            .values()
            .filter(|r| r.category_ids.contains(&category_id))
            .cloned()
            .collect())
    }

    async fn update_register(
        &self,
        id: DbId,
        input: &UpdateRegister,
    ) -> StoreResult<Option<Register>> {
        let mut tables = self.tables.write().await;
        Ok(tables.registers.modify(id, |r| {
            set(&mut r.project_name, &input.project_name);
            set(&mut r.project_number, &input.project_number);
            set(&mut r.discipline, &input.discipline);
            set(&mut r.engineers, &input.engineers);
            if input.start_date.is_some() {
                r.start_date = input.start_date;
            }
            if input.end_date.is_some() {
                r.end_date = input.end_date;
            }
            r.updated_at = Utc::now();
        }))
    }

    async fn attach_category_refs(
        &self,
        register_id: DbId,
        category_ids: &[DbId],
        position: RefPosition,
    ) -> StoreResult<Option<Register>> {
        let mut tables = self.tables.write().await;
        Ok(tables.registers.modify(register_id, |r| {
            references::attach(&mut r.category_ids, category_ids, position);
            r.updated_at = Utc::now();
        }))
    }

    async fn detach_category_ref(
        &self,
        register_id: DbId,
        category_id: DbId,
    ) -> StoreResult<Option<Register>> {
        let mut tables = self.tables.write().await;
        Ok(tables.registers.modify(register_id, |r| {
            if references::detach(&mut r.category_ids, category_id) {
                r.updated_at = Utc::now();
            }
        }))
    }

    async fn delete_register(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.registers.remove(id))
    }
}

#[async_trait]
impl IssueSheetStore for MemoryStore {
    async fn create_issue_sheet(
        &self,
        sequence_number: i64,
        input: &CreateIssueSheet,
        issued: &[IssuedDrawing],
    ) -> StoreResult<IssueSheet> {
        let mut tables = self.tables.write().await;
        if tables
            .issue_sheets
            .rows
            .values()
            .any(|s| s.sequence_number == sequence_number)
        {
            return Err(unique_violation(UQ_ISSUE_SHEETS_SEQUENCE_NUMBER).into());
        }

        let now = Utc::now();
        let sheet = IssueSheet {
            id: tables.issue_sheets.next_id(),
            sequence_number,
            recipient: input.recipient.clone(),
            attention_to: input.attention_to.clone(),
            client: input.client.clone(),
            project_name: input.project_name.clone(),
            project_number: input.project_number,
            issued_drawings: issued.to_vec(),
            remarks: input.remarks.clone(),
            purpose: input.purpose.clone(),
            media: input.media,
            issued_by: input.issued_by.clone(),
            received_by: input.received_by.clone(),
            is_saved: input.is_saved,
            created_at: now,
            updated_at: now,
        };
        tables.issue_sheets.rows.insert(sheet.id, sheet.clone());
        Ok(sheet)
    }

    async fn find_issue_sheet(&self, id: DbId) -> StoreResult<Option<IssueSheet>> {
        Ok(self.tables.read().await.issue_sheets.get(id))
    }

    async fn list_issue_sheets(&self) -> StoreResult<Vec<IssueSheet>> {
        let mut sheets = self.tables.read().await.issue_sheets.all();
        sheets.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        Ok(sheets)
    }

    async fn update_issue_sheet(
        &self,
        id: DbId,
        input: &UpdateIssueSheet,
    ) -> StoreResult<Option<IssueSheet>> {
        let mut tables = self.tables.write().await;
        Ok(tables.issue_sheets.modify(id, |s| {
            set(&mut s.recipient, &input.recipient);
            set(&mut s.attention_to, &input.attention_to);
            set(&mut s.client, &input.client);
            set(&mut s.project_name, &input.project_name);
            if input.project_number.is_some() {
                s.project_number = input.project_number;
            }
            set(&mut s.remarks, &input.remarks);
            set(&mut s.purpose, &input.purpose);
            set(&mut s.media, &input.media);
            set(&mut s.issued_by, &input.issued_by);
            set(&mut s.received_by, &input.received_by);
            set(&mut s.is_saved, &input.is_saved);
            s.updated_at = Utc::now();
        }))
    }

    async fn set_issued_drawings(
        &self,
        id: DbId,
        issued: &[IssuedDrawing],
    ) -> StoreResult<Option<IssueSheet>> {
        let mut tables = self.tables.write().await;
        Ok(tables.issue_sheets.modify(id, |s| {
            s.issued_drawings = issued.to_vec();
            s.updated_at = Utc::now();
        }))
    }

    async fn delete_issue_sheet(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.issue_sheets.remove(id))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.rows.values().any(|u| u.email == input.email) {
            return Err(unique_violation(UQ_USERS_EMAIL).into());
        }

        let now = Utc::now();
        let user = User {
            id: tables.users.next_id(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone().unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            department: input.department.clone(),
            signature: input.signature.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.all())
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &input.email {
            if tables
                .users
                .rows
                .values()
                .any(|u| u.id != id && &u.email == email)
            {
                return Err(unique_violation(UQ_USERS_EMAIL).into());
            }
        }

        Ok(tables.users.modify(id, |u| {
            set(&mut u.first_name, &input.first_name);
            set(&mut u.last_name, &input.last_name);
            set(&mut u.email, &input.email);
            set(&mut u.password_hash, &input.password_hash);
            set(&mut u.role, &input.role);
            if input.department.is_some() {
                u.department = input.department.clone();
            }
            if input.signature.is_some() {
                u.signature = input.signature.clone();
            }
            u.updated_at = Utc::now();
        }))
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.users.remove(id))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
