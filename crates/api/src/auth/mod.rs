//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access and refresh token generation and validation.

pub mod jwt;
pub mod password;
