//! CLI command implementations.

pub mod common;
pub mod compile;
pub mod pulse;
pub mod version;
