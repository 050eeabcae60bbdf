//! Tool inventory rules
//!
//! Pure functions shared by the assignment, return and maintenance paths.
//! The services run them inside a database transaction; nothing here touches
//! the database.

pub mod rollup;
pub mod serials;

pub use rollup::{aggregate, ensure_assignable, ensure_repairable};
pub use serials::{diff_serials, normalize_serials, SerialDiff};
