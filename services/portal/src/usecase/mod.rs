pub mod account;
pub mod employee;
pub mod registration;
pub mod request;
pub mod session;
pub mod store;

/// Outcome of a create-or-edit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved<Id> {
    Created(Id),
    Updated(Id),
    /// The edit target no longer exists; nothing was changed.
    Missing,
}
