use std::collections::BTreeMap;

use portal_domain::account::{Role, normalize_email};
use portal_domain::day::Day;
use portal_domain::id::{AccountId, DepartmentId, EmployeeId, RequestId};
use portal_domain::request::RequestStatus;

use crate::error::ValidationError;

/// Slot holding the whole dataset document.
pub const DATASET_SLOT: &str = "ipt_demo_v1";

/// Slot holding the email of the signed-in identity.
pub const AUTH_TOKEN_SLOT: &str = "auth_token";

/// Slot holding the email awaiting simulated verification.
pub const UNVERIFIED_EMAIL_SLOT: &str = "unverified_email";

/// Slot set to `"true"` right after verification; consumed by the login panel.
pub const EMAIL_VERIFIED_SLOT: &str = "email_verified";

/// Toast severity, mirrored by the presentation surface's colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Global UI flags derived from the session (authenticated / admin body classes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub authenticated: bool,
    pub admin: bool,
    pub display_name: Option<String>,
}

/// Named containers (forms, modal, banner) the core can show, hide, fill or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    RegisterForm,
    LoginForm,
    EmployeeForm,
    AccountForm,
    RequestModal,
    LoginVerifiedBanner,
}

/// Field values read from (or pre-filled into) a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_owned(), value.into());
    }

    /// Raw value; an absent field reads as empty, like a blank input.
    pub fn raw(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn trimmed(&self, name: &str) -> &str {
        self.raw(name).trim()
    }

    /// Trimmed value that must not be empty.
    pub fn required(&self, name: &'static str) -> Result<String, ValidationError> {
        let value = self.trimmed(name);
        if value.is_empty() {
            return Err(ValidationError::MissingField(name));
        }
        Ok(value.to_owned())
    }

    /// Required email, normalized to lowercase.
    pub fn required_email(&self, name: &'static str) -> Result<String, ValidationError> {
        self.required(name).map(|v| normalize_email(&v))
    }

    /// Checkbox semantics.
    pub fn checked(&self, name: &str) -> bool {
        matches!(
            self.trimmed(name).to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── panel views ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub employee_code: String,
    /// Account full name, or the raw email when the account is gone.
    pub name: String,
    pub position: String,
    /// Department name, or `N/A` when the department is gone.
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub id: RequestId,
    pub date: Day,
    pub kind: String,
    pub items: String,
    pub status: RequestStatus,
    pub badge: Severity,
}

/// Content of one panel, produced by a render function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Home,
    Register,
    VerifyEmail { pending_email: Option<String> },
    Login { verified_banner: bool },
    Profile(Option<ProfileView>),
    Employees(Vec<EmployeeRow>),
    Departments(Vec<DepartmentRow>),
    Accounts(Vec<AccountRow>),
    Requests(Vec<RequestRow>),
}

impl PanelView {
    /// Message shown instead of an empty table.
    pub fn empty_notice(&self) -> Option<&'static str> {
        match self {
            Self::Employees(rows) if rows.is_empty() => Some("No employees."),
            Self::Departments(rows) if rows.is_empty() => Some("No departments."),
            Self::Accounts(rows) if rows.is_empty() => Some("No accounts."),
            Self::Requests(rows) if rows.is_empty() => Some("You have no requests yet."),
            _ => None,
        }
    }
}
