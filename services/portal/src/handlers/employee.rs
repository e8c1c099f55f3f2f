use tracing::debug;

use portal_domain::id::EmployeeId;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{Container, FormValues, Severity};
use crate::error::PortalError;
use crate::router::Location;
use crate::state::Portal;
use crate::usecase::Saved;
use crate::usecase::employee::{
    DeleteEmployeeUseCase, EmployeeInput, SaveEmployeeUseCase, department_choices,
};

pub const EMPLOYEE_ADDED: &str = "Employee added";
pub const EMPLOYEE_UPDATED: &str = "Employee updated";
pub const EMPLOYEE_DELETED: &str = "Employee deleted";
pub const CONFIRM_DELETE_EMPLOYEE: &str = "Delete this employee?";

impl<S: SlotStore, U: Surface> Portal<S, U> {
    pub fn open_employee_form(&mut self, edit_id: Option<EmployeeId>) -> Result<(), PortalError> {
        self.authorize(true)?;
        self.surface
            .set_choices("departmentId", &department_choices(&self.state.dataset));

        let existing = edit_id
            .as_ref()
            .and_then(|id| self.state.dataset.employee(id));
        let values = existing.map(EmployeeInput::to_form).unwrap_or_default();
        if edit_id.is_some() && existing.is_none() {
            debug!("employee to edit is gone, opening empty form");
        }

        self.state.forms.employee_edit = existing.map(|employee| employee.id.clone());
        self.surface.fill_form(Container::EmployeeForm, &values);
        self.surface.set_visible(Container::EmployeeForm, true);
        Ok(())
    }

    pub fn close_employee_form(&mut self) {
        self.state.forms.employee_edit = None;
        self.surface.set_visible(Container::EmployeeForm, false);
        self.surface.fill_form(Container::EmployeeForm, &FormValues::new());
    }

    pub async fn submit_employee_form(&mut self) -> Result<(), PortalError> {
        self.authorize(true)?;
        let input = EmployeeInput::from_form(&self.surface.read_form(Container::EmployeeForm))?;
        let edit_id = self.state.forms.employee_edit.clone();

        let saved = SaveEmployeeUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(input, edit_id.as_ref())?;

        let message = match saved {
            Saved::Created(_) => Some(EMPLOYEE_ADDED),
            Saved::Updated(_) => Some(EMPLOYEE_UPDATED),
            Saved::Missing => {
                debug!("employee edit target gone, nothing saved");
                None
            }
        };
        if let Some(message) = message {
            self.persist().await;
            self.notify(message, Severity::Success);
        }

        self.close_employee_form();
        self.refresh(Location::Employees);
        Ok(())
    }

    pub async fn delete_employee(&mut self, id: EmployeeId) -> Result<(), PortalError> {
        self.authorize(true)?;
        if !self.surface.confirm(CONFIRM_DELETE_EMPLOYEE).await {
            return Ok(());
        }

        let removed = DeleteEmployeeUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(&id);
        if removed {
            self.persist().await;
            self.notify(EMPLOYEE_DELETED, Severity::Info);
        } else {
            debug!(employee_id = %id, "employee already gone");
        }
        self.refresh(Location::Employees);
        Ok(())
    }
}
