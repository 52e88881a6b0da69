//! CLI command implementations.

pub mod check;
pub mod classify;
pub mod list_checks;
