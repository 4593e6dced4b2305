//! CLI command implementations.

pub mod backends;
pub mod benchmark;
pub mod common;
pub mod resolve;
pub mod status;
pub mod tabulate;
pub mod version;
