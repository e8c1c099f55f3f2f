//! Hash-style location router with authentication and role guards.

use std::fmt;

use tracing::debug;

use portal_domain::account::Account;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{
    Container, EMAIL_VERIFIED_SLOT, PanelView, Severity, UNVERIFIED_EMAIL_SLOT,
};
use crate::render;
use crate::state::Portal;

/// Closed set of navigable locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Home,
    Register,
    VerifyEmail,
    Login,
    Profile,
    Employees,
    Departments,
    Accounts,
    Requests,
}

pub const ACCESS_DENIED: &str = "Access denied. Admin only.";

impl Location {
    pub const ALL: [Location; 9] = [
        Self::Home,
        Self::Register,
        Self::VerifyEmail,
        Self::Login,
        Self::Profile,
        Self::Employees,
        Self::Departments,
        Self::Accounts,
        Self::Requests,
    ];

    /// Accepts `#/login`, `/login` or `login`. Empty or unknown names resolve
    /// to `Home`; that is a fallback, not an error.
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim().trim_start_matches('#').trim_start_matches('/');
        match name {
            "register" => Self::Register,
            "verify-email" => Self::VerifyEmail,
            "login" => Self::Login,
            "profile" => Self::Profile,
            "employees" => Self::Employees,
            "departments" => Self::Departments,
            "accounts" => Self::Accounts,
            "requests" => Self::Requests,
            _ => Self::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Register => "/register",
            Self::VerifyEmail => "/verify-email",
            Self::Login => "/login",
            Self::Profile => "/profile",
            Self::Employees => "/employees",
            Self::Departments => "/departments",
            Self::Accounts => "/accounts",
            Self::Requests => "/requests",
        }
    }

    /// Requires an authenticated identity.
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Profile | Self::Employees | Self::Departments | Self::Accounts | Self::Requests
        )
    }

    /// Requires the Admin role. Always a subset of the protected set.
    pub fn is_admin_only(self) -> bool {
        matches!(self, Self::Employees | Self::Departments | Self::Accounts)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.path())
    }
}

/// Outcome of guarding one navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Show(Location),
    Redirect {
        to: Location,
        notice: Option<(&'static str, Severity)>,
    },
}

/// Apply the guards for `location` given the current identity.
pub fn resolve(location: Location, identity: Option<&Account>) -> Resolution {
    if location.is_protected() && identity.is_none() {
        return Resolution::Redirect {
            to: Location::Login,
            notice: None,
        };
    }
    if location.is_admin_only() && !identity.is_some_and(Account::is_admin) {
        return Resolution::Redirect {
            to: Location::Home,
            notice: Some((ACCESS_DENIED, Severity::Danger)),
        };
    }
    Resolution::Show(location)
}

impl<S: SlotStore, U: Surface> Portal<S, U> {
    /// Navigate to a raw location string (`#/accounts`, `/login`, ...).
    pub async fn navigate(&mut self, raw: &str) {
        self.go(Location::parse(raw)).await;
    }

    /// Navigate, following guard redirects until a panel is shown.
    pub async fn go(&mut self, mut location: Location) {
        loop {
            match resolve(location, self.identity()) {
                Resolution::Show(target) => {
                    debug!(location = %target, "show panel");
                    self.state.location = target;
                    self.enter(target).await;
                    return;
                }
                Resolution::Redirect { to, notice } => {
                    debug!(from = %location, to = %to, "redirect");
                    if let Some((message, severity)) = notice {
                        self.surface.notify(message, severity);
                    }
                    location = to;
                }
            }
        }
    }

    /// Run the panel's side effect, then render it.
    async fn enter(&mut self, location: Location) {
        let view = match location {
            Location::VerifyEmail => PanelView::VerifyEmail {
                pending_email: self.read_slot(UNVERIFIED_EMAIL_SLOT).await,
            },
            Location::Login => {
                let verified_banner =
                    self.read_slot(EMAIL_VERIFIED_SLOT).await.as_deref() == Some("true");
                if verified_banner {
                    self.clear_slot(EMAIL_VERIFIED_SLOT).await;
                }
                self.surface
                    .set_visible(Container::LoginVerifiedBanner, verified_banner);
                PanelView::Login { verified_banner }
            }
            other => render::render(other, &self.state.dataset, self.identity()),
        };
        self.surface.show_panel(location, &view);
    }

    /// Re-render `location` after a mutation, if it is the visible panel.
    pub fn refresh(&self, location: Location) {
        if self.state.location != location {
            debug!(location = %location, "skip refresh of hidden panel");
            return;
        }
        let view = render::render(location, &self.state.dataset, self.identity());
        self.surface.show_panel(location, &view);
    }
}
