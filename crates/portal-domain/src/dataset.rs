//! The whole persisted document: four flat collections.
//!
//! Lookups are linear scans; the data set is tiny and there are no indexes.

use serde::{Deserialize, Serialize};

use crate::account::{Account, Role};
use crate::department::Department;
use crate::employee::Employee;
use crate::id::{AccountId, DepartmentId, EmployeeId};
use crate::request::Request;

pub const SEED_ADMIN_EMAIL: &str = "admin@example.com";
pub const SEED_ADMIN_PASSWORD: &str = "Password123!";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub accounts: Vec<Account>,
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub requests: Vec<Request>,
}

/// Result of following a soft reference.
///
/// Deleting an account or department never cascades, so a reference may
/// point at nothing. Callers must decide what to show in that case.
#[derive(Debug, PartialEq, Eq)]
pub enum SoftRef<'a, T> {
    Resolved(&'a T),
    Dangling,
}

impl<'a, T> SoftRef<'a, T> {
    fn from_option(found: Option<&'a T>) -> Self {
        match found {
            Some(value) => Self::Resolved(value),
            None => Self::Dangling,
        }
    }

    pub fn resolved(self) -> Option<&'a T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Dangling => None,
        }
    }
}

impl Dataset {
    /// Default document written on first run or when the stored one is corrupt.
    pub fn seed() -> Self {
        Self {
            accounts: vec![Account {
                id: AccountId::generate(),
                first_name: "Admin".into(),
                last_name: "User".into(),
                email: SEED_ADMIN_EMAIL.into(),
                password: SEED_ADMIN_PASSWORD.into(),
                role: Role::Admin,
                verified: true,
            }],
            departments: vec![
                Department {
                    id: DepartmentId::generate(),
                    name: "Engineering".into(),
                    description: "Software team".into(),
                },
                Department {
                    id: DepartmentId::generate(),
                    name: "HR".into(),
                    description: "Human Resources".into(),
                },
            ],
            employees: Vec::new(),
            requests: Vec::new(),
        }
    }

    // ── accounts ────────────────────────────────────────────────────────────

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub fn account_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| &a.id == id)
    }

    /// `email` must already be normalized.
    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    pub fn account_by_email_mut(&mut self, email: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.email == email)
    }

    /// True when another account (not `except`) already owns `email`.
    pub fn email_in_use(&self, email: &str, except: Option<&AccountId>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == email && Some(&a.id) != except)
    }

    /// Returns `true` if a record was removed.
    pub fn remove_account(&mut self, id: &AccountId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| &a.id != id);
        self.accounts.len() != before
    }

    // ── departments ─────────────────────────────────────────────────────────

    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id == id)
    }

    // ── employees ───────────────────────────────────────────────────────────

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }

    pub fn remove_employee(&mut self, id: &EmployeeId) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| &e.id != id);
        self.employees.len() != before
    }

    pub fn employee_account(&self, employee: &Employee) -> SoftRef<'_, Account> {
        SoftRef::from_option(self.account_by_email(&employee.user_email))
    }

    pub fn employee_department(&self, employee: &Employee) -> SoftRef<'_, Department> {
        SoftRef::from_option(self.department(&employee.department_id))
    }

    // ── requests ────────────────────────────────────────────────────────────

    /// Requests submitted by `email`, in submission order.
    pub fn requests_for<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Request> + 'a {
        self.requests.iter().filter(move |r| r.employee_email == email)
    }
}
