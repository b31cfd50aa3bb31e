//! Domain types, errors and pure logic for the drawing register service.
//!
//! Nothing in this crate performs I/O; persistence lives in `drawreg_db`.

pub mod error;
pub mod issued;
pub mod media;
pub mod references;
pub mod roles;
pub mod types;
pub mod validation;
