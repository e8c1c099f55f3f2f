//! Form controllers. Each one reads its inputs from the surface, runs a use
//! case, persists, notifies and re-renders. Errors are returned to the caller,
//! which turns them into toasts.

pub mod account;
pub mod auth;
pub mod department;
pub mod employee;
pub mod request;
