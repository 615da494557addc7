//! Core service logic.
//!
//! - `users`: registration, bound to the owner key minted at session setup
//! - `meals`: ownership-guarded meal CRUD and listing
//! - `summary`: adherence metrics, including the longest on-diet streak

pub mod meals;
pub mod summary;
pub mod users;
