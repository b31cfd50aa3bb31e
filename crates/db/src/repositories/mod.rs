//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod counter_repo;
pub mod drawing_repo;
pub mod issue_sheet_repo;
pub mod register_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use counter_repo::CounterRepo;
pub use drawing_repo::DrawingRepo;
pub use issue_sheet_repo::IssueSheetRepo;
pub use register_repo::RegisterRepo;
pub use user_repo::UserRepo;
