//! Domain types for the request portal.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod account;
pub mod dataset;
pub mod day;
pub mod department;
pub mod employee;
pub mod id;
pub mod request;
