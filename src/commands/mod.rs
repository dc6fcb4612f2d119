//! CLI command implementations.

pub mod check;
pub mod update;

pub use check::CheckCommand;
pub use update::{UpdateCommand, UpdateSummary};
