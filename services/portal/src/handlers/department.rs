use portal_domain::id::DepartmentId;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::Severity;
use crate::error::PortalError;
use crate::state::Portal;

pub const CREATE_NOT_IMPLEMENTED: &str = "Department creation not implemented yet";
pub const EDIT_NOT_IMPLEMENTED: &str = "Department editing not implemented yet";
pub const DELETE_NOT_IMPLEMENTED: &str = "Department deletion not implemented yet";

// Departments are read-only: the seed defines them and nothing changes them.
impl<S: SlotStore, U: Surface> Portal<S, U> {
    pub fn add_department(&self) -> Result<(), PortalError> {
        self.authorize(true)?;
        self.notify(CREATE_NOT_IMPLEMENTED, Severity::Info);
        Ok(())
    }

    pub fn edit_department(&self, _id: DepartmentId) -> Result<(), PortalError> {
        self.authorize(true)?;
        self.notify(EDIT_NOT_IMPLEMENTED, Severity::Info);
        Ok(())
    }

    pub fn delete_department(&self, _id: DepartmentId) -> Result<(), PortalError> {
        self.authorize(true)?;
        self.notify(DELETE_NOT_IMPLEMENTED, Severity::Info);
        Ok(())
    }
}
