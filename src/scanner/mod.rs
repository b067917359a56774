//! Conflict scanner: filename pattern, directory walker, removal.

pub mod deletion;
pub mod pattern;
pub mod walker;
