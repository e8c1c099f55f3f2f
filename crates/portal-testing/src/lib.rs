//! Test utilities for the portal.
//!
//! Provides dataset builders and the JSON fixture loader.
//! Import from tests only, never from production code.

pub mod builders;
pub mod fixture;
