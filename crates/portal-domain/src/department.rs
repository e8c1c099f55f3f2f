use serde::{Deserialize, Serialize};

use crate::id::DepartmentId;

/// Organisational unit. Read-only in this version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
}
