pub mod categories;
pub mod drawings;
pub mod issue_sheets;
pub mod registers;
pub mod users;
