//! Render functions: pure functions of the dataset and identity that build
//! one panel's content. Every call is a full re-render.

use portal_domain::account::Account;
use portal_domain::dataset::{Dataset, SoftRef};
use portal_domain::request::RequestStatus;

use crate::domain::types::{
    AccountRow, DepartmentRow, EmployeeRow, PanelView, ProfileView, RequestRow, Severity,
};
use crate::router::Location;

/// Shown when an employee's department id no longer resolves.
pub const MISSING_DEPARTMENT: &str = "N/A";

pub fn render(location: Location, dataset: &Dataset, identity: Option<&Account>) -> PanelView {
    match location {
        Location::Home => PanelView::Home,
        Location::Register => PanelView::Register,
        Location::VerifyEmail => PanelView::VerifyEmail {
            pending_email: None,
        },
        Location::Login => PanelView::Login {
            verified_banner: false,
        },
        Location::Profile => PanelView::Profile(identity.map(render_profile)),
        Location::Employees => PanelView::Employees(render_employees(dataset)),
        Location::Departments => PanelView::Departments(render_departments(dataset)),
        Location::Accounts => PanelView::Accounts(render_accounts(dataset)),
        Location::Requests => PanelView::Requests(
            identity
                .map(|who| render_requests(dataset, who))
                .unwrap_or_default(),
        ),
    }
}

pub fn render_profile(identity: &Account) -> ProfileView {
    ProfileView {
        name: identity.full_name(),
        email: identity.email.clone(),
        role: identity.role,
    }
}

pub fn render_employees(dataset: &Dataset) -> Vec<EmployeeRow> {
    dataset
        .employees
        .iter()
        .map(|emp| EmployeeRow {
            id: emp.id.clone(),
            employee_code: emp.employee_id.clone(),
            name: match dataset.employee_account(emp) {
                SoftRef::Resolved(account) => account.full_name(),
                SoftRef::Dangling => emp.user_email.clone(),
            },
            position: emp.position.clone(),
            department: match dataset.employee_department(emp) {
                SoftRef::Resolved(dept) => dept.name.clone(),
                SoftRef::Dangling => MISSING_DEPARTMENT.to_owned(),
            },
        })
        .collect()
}

pub fn render_departments(dataset: &Dataset) -> Vec<DepartmentRow> {
    dataset
        .departments
        .iter()
        .map(|dept| DepartmentRow {
            id: dept.id.clone(),
            name: dept.name.clone(),
            description: dept.description.clone(),
        })
        .collect()
}

pub fn render_accounts(dataset: &Dataset) -> Vec<AccountRow> {
    dataset
        .accounts
        .iter()
        .map(|acc| AccountRow {
            id: acc.id.clone(),
            name: acc.full_name(),
            email: acc.email.clone(),
            role: acc.role,
            verified: acc.verified,
        })
        .collect()
}

/// Only `identity`'s own requests. Never shows another account's data.
pub fn render_requests(dataset: &Dataset, identity: &Account) -> Vec<RequestRow> {
    dataset
        .requests_for(&identity.email)
        .map(|req| RequestRow {
            id: req.id.clone(),
            date: req.date.clone(),
            kind: req.kind.clone(),
            items: req.item_summary(),
            status: req.status,
            badge: status_badge(req.status),
        })
        .collect()
}

pub fn status_badge(status: RequestStatus) -> Severity {
    match status {
        RequestStatus::Approved => Severity::Success,
        RequestStatus::Rejected => Severity::Danger,
        RequestStatus::Pending => Severity::Warning,
    }
}
