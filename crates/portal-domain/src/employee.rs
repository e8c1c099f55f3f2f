//! Employee domain types.

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::id::{DepartmentId, EmployeeId};

/// Staff record linked to an account by email and to a department by id.
///
/// Both links are soft references: they are checked when the record is
/// submitted but never cascaded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    /// Display code, e.g. `EMP-001`.
    pub employee_id: String,
    pub user_email: String,
    pub position: String,
    pub department_id: DepartmentId,
    pub hire_date: Day,
}
