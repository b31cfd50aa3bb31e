//! Operations that span more than one table.
//!
//! The stores only know single-table reads and writes. Everything that has
//! to sequence several of them (creating a child and then attaching it,
//! detaching a reference and then deleting the document, allocating an issue
//! sheet number) lives here, written against `&dyn Store` so the PostgreSQL
//! and in-memory backends behave identically.
//!
//! None of these sequences is transactional. A failure part-way through can
//! leave an orphan child, but never a reference to a document that was not
//! created first.

pub mod categories;
pub mod drawings;
pub mod issue_sheets;
pub mod registers;
