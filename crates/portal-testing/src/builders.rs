//! Small builders for datasets used across tests.

use chrono::NaiveDate;

use portal_domain::account::{Account, Role};
use portal_domain::dataset::Dataset;
use portal_domain::employee::Employee;
use portal_domain::id::{AccountId, DepartmentId, EmployeeId, RequestId};
use portal_domain::request::{Request, RequestItem, RequestStatus};

pub const TEST_PASSWORD: &str = "secret1";

/// Account named after the local part of `email`, password [`TEST_PASSWORD`].
pub fn account(email: &str, role: Role, verified: bool) -> Account {
    let local = email.split('@').next().unwrap_or(email);
    Account {
        id: AccountId::generate(),
        first_name: local.to_owned(),
        last_name: "Tester".into(),
        email: email.to_owned(),
        password: TEST_PASSWORD.into(),
        role,
        verified,
    }
}

pub fn employee(code: &str, email: &str, department_id: &DepartmentId) -> Employee {
    Employee {
        id: EmployeeId::generate(),
        employee_id: code.to_owned(),
        user_email: email.to_owned(),
        position: "Engineer".into(),
        department_id: department_id.clone(),
        hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().into(),
    }
}

pub fn request(email: &str, items: &[(&str, u64)], status: RequestStatus) -> Request {
    Request {
        id: RequestId::generate(),
        kind: "Equipment".into(),
        items: items
            .iter()
            .map(|(name, qty)| RequestItem {
                name: (*name).to_owned(),
                qty: *qty,
            })
            .collect(),
        status,
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().into(),
        employee_email: email.to_owned(),
    }
}

/// Seed dataset plus whatever the test adds.
pub struct DatasetBuilder {
    dataset: Dataset,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DatasetBuilder {
    pub fn seeded() -> Self {
        Self {
            dataset: Dataset::seed(),
        }
    }

    pub fn empty() -> Self {
        Self {
            dataset: Dataset::default(),
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.dataset.accounts.push(account);
        self
    }

    /// Verified `User` account for `email`.
    pub fn with_user(self, email: &str) -> Self {
        self.with_account(account(email, Role::User, true))
    }

    /// Employee linked to `email`, placed in the first department.
    pub fn with_employee(mut self, code: &str, email: &str) -> Self {
        let department_id = self
            .dataset
            .departments
            .first()
            .map(|dept| dept.id.clone())
            .unwrap_or_else(|| DepartmentId::from("none"));
        self.dataset
            .employees
            .push(employee(code, email, &department_id));
        self
    }

    pub fn with_request(mut self, request: Request) -> Self {
        self.dataset.requests.push(request);
        self
    }

    pub fn build(self) -> Dataset {
        self.dataset
    }
}
