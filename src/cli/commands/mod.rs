//! Command implementations.

pub mod catalog;
pub mod completions;
pub mod run;
pub mod version;
