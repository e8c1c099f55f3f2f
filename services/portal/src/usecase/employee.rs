use chrono::NaiveDate;
use tracing::info;

use portal_domain::dataset::Dataset;
use portal_domain::day::Day;
use portal_domain::employee::Employee;
use portal_domain::id::{DepartmentId, EmployeeId};

use crate::domain::types::FormValues;
use crate::error::{PortalError, ValidationError};
use crate::usecase::Saved;

// ── SaveEmployee ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub employee_id: String,
    pub user_email: String,
    pub position: String,
    pub department_id: DepartmentId,
    pub hire_date: NaiveDate,
}

impl EmployeeInput {
    /// Fields: `employeeId`, `userEmail`, `position`, `departmentId`,
    /// `hireDate`. All required.
    pub fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let employee_id = form.required("employeeId")?;
        let user_email = form.required_email("userEmail")?;
        let position = form.required("position")?;
        let department_id = DepartmentId::from(form.required("departmentId")?.as_str());
        let hire_date = Day::parse(&form.required("hireDate")?)
            .ok_or(ValidationError::InvalidDate("hireDate"))?;

        Ok(Self {
            employee_id,
            user_email,
            position,
            department_id,
            hire_date,
        })
    }

    pub fn to_form(employee: &Employee) -> FormValues {
        FormValues::new()
            .with("employeeId", employee.employee_id.as_str())
            .with("userEmail", employee.user_email.as_str())
            .with("position", employee.position.as_str())
            .with("departmentId", employee.department_id.as_str())
            .with("hireDate", employee.hire_date.as_str())
    }
}

pub struct SaveEmployeeUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl SaveEmployeeUseCase<'_> {
    /// The linked account must exist at submit time. The department id is
    /// stored as given; it only has to resolve when rendered.
    pub fn execute(
        &mut self,
        input: EmployeeInput,
        edit_id: Option<&EmployeeId>,
    ) -> Result<Saved<EmployeeId>, PortalError> {
        if self.dataset.account_by_email(&input.user_email).is_none() {
            return Err(ValidationError::UnknownUserEmail.into());
        }

        let Some(edit_id) = edit_id else {
            let id = EmployeeId::generate();
            self.dataset.employees.push(Employee {
                id: id.clone(),
                employee_id: input.employee_id,
                user_email: input.user_email,
                position: input.position,
                department_id: input.department_id,
                hire_date: input.hire_date.into(),
            });
            info!(employee_id = %id, "employee created");
            return Ok(Saved::Created(id));
        };

        let Some(employee) = self.dataset.employee_mut(edit_id) else {
            return Ok(Saved::Missing);
        };
        employee.employee_id = input.employee_id;
        employee.user_email = input.user_email;
        employee.position = input.position;
        employee.department_id = input.department_id;
        employee.hire_date = input.hire_date.into();
        info!(employee_id = %edit_id, "employee updated");
        Ok(Saved::Updated(edit_id.clone()))
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl DeleteEmployeeUseCase<'_> {
    pub fn execute(&mut self, id: &EmployeeId) -> bool {
        let removed = self.dataset.remove_employee(id);
        if removed {
            info!(employee_id = %id, "employee deleted");
        }
        removed
    }
}

/// `(id, name)` pairs for the department select.
pub fn department_choices(dataset: &Dataset) -> Vec<(String, String)> {
    dataset
        .departments
        .iter()
        .map(|dept| (dept.id.to_string(), dept.name.clone()))
        .collect()
}
