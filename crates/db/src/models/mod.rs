//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the entity holds references, a populated view for reads

pub mod category;
pub mod drawing;
pub mod issue_sheet;
pub mod register;
pub mod user;
