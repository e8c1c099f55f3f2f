//! Ambient plumbing shared by portal binaries: tracing setup and env config.

pub mod config;
pub mod tracing;
