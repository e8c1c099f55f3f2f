#![allow(async_fn_in_trait)]

use crate::domain::types::{Container, FormValues, PanelView, SessionFlags, Severity};
use crate::error::StorageError;
use crate::router::Location;

/// Durable named text slots (the browser's local storage, in spirit).
///
/// Every write replaces the whole slot value; there are no partial writes.
pub trait SlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent slot is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Presentation port. The router and controllers only ever talk to the
/// display through this trait, so they run headless in tests.
pub trait Surface {
    /// Make `location`'s panel the visible one and draw `view` into it.
    fn show_panel(&self, location: Location, view: &PanelView);

    fn set_session_flags(&self, flags: &SessionFlags);

    fn set_visible(&self, container: Container, visible: bool);

    /// Pre-fill (or clear, with empty values) a form's inputs.
    fn fill_form(&self, container: Container, values: &FormValues);

    /// Current field values of a form.
    fn read_form(&self, container: Container) -> FormValues;

    /// Replace the `(value, label)` options of a select field.
    fn set_choices(&self, field: &str, choices: &[(String, String)]);

    /// Transient, auto-dismissing status message.
    fn notify(&self, message: &str, severity: Severity);

    async fn confirm(&self, message: &str) -> bool;

    /// `None` when the user cancels.
    async fn prompt(&self, message: &str) -> Option<String>;
}
