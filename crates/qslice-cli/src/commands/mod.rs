//! CLI command implementations.

pub mod analyze;
pub mod bundle;
pub mod common;
pub mod modular;
pub mod schedule;
pub mod topology;
pub mod version;
