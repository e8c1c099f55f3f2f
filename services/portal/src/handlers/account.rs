use tracing::debug;

use portal_domain::id::AccountId;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{AUTH_TOKEN_SLOT, Container, FormValues, Severity};
use crate::error::PortalError;
use crate::router::Location;
use crate::state::Portal;
use crate::usecase::Saved;
use crate::usecase::account::{
    AccountInput, DeleteAccountUseCase, ResetPasswordUseCase, SaveAccountUseCase,
    ensure_deletable,
};

pub const ACCOUNT_CREATED: &str = "Account created";
pub const ACCOUNT_UPDATED: &str = "Account updated";
pub const ACCOUNT_DELETED: &str = "Account deleted";
pub const PASSWORD_RESET: &str = "Password reset successfully";
pub const CONFIRM_DELETE_ACCOUNT: &str = "Delete this account? This cannot be undone.";
pub const RESET_PASSWORD_PROMPT: &str = "Enter new password (min 6 characters):";

impl<S: SlotStore, U: Surface> Portal<S, U> {
    /// Open the account form empty, or pre-filled from `edit_id`.
    pub fn open_account_form(&mut self, edit_id: Option<AccountId>) -> Result<(), PortalError> {
        self.authorize(true)?;
        let existing = edit_id
            .as_ref()
            .and_then(|id| self.state.dataset.account(id));
        let values = existing.map(AccountInput::to_form).unwrap_or_default();
        if edit_id.is_some() && existing.is_none() {
            debug!("account to edit is gone, opening empty form");
        }

        self.state.forms.account_edit = existing.map(|account| account.id.clone());
        self.surface.fill_form(Container::AccountForm, &values);
        self.surface.set_visible(Container::AccountForm, true);
        Ok(())
    }

    pub fn close_account_form(&mut self) {
        self.state.forms.account_edit = None;
        self.surface.set_visible(Container::AccountForm, false);
        self.surface.fill_form(Container::AccountForm, &FormValues::new());
    }

    pub async fn submit_account_form(&mut self) -> Result<(), PortalError> {
        self.authorize(true)?;
        let input = AccountInput::from_form(&self.surface.read_form(Container::AccountForm))?;
        let edit_id = self.state.forms.account_edit.clone();

        let saved = SaveAccountUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(input, edit_id.as_ref())?;

        match saved {
            Saved::Created(_) => {
                self.persist().await;
                self.notify(ACCOUNT_CREATED, Severity::Success);
            }
            Saved::Updated(id) => {
                self.persist().await;
                if self.state.session.identity_id() == Some(&id) {
                    self.sync_own_token().await;
                }
                self.notify(ACCOUNT_UPDATED, Severity::Success);
            }
            Saved::Missing => debug!("account edit target gone, nothing saved"),
        }

        self.close_account_form();
        if self.authorize(true).is_ok() {
            self.refresh(Location::Accounts);
        } else {
            // Own role was lowered: the visible panel goes back through the guards.
            self.go(self.state.location).await;
        }
        Ok(())
    }

    /// Rewrite the stored token and header after the signed-in account was
    /// edited, so its new email still restores the session.
    async fn sync_own_token(&self) {
        if let Some(email) = self.identity().map(|account| account.email.clone()) {
            self.write_slot(AUTH_TOKEN_SLOT, &email).await;
        }
        self.push_session_flags();
    }

    /// Cancelling the prompt is silent.
    pub async fn reset_password(&mut self, id: AccountId) -> Result<(), PortalError> {
        self.authorize(true)?;
        let Some(new_password) = self.surface.prompt(RESET_PASSWORD_PROMPT).await else {
            return Ok(());
        };

        let saved = ResetPasswordUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(&id, &new_password)?;

        match saved {
            Saved::Missing => debug!(account_id = %id, "password reset target gone"),
            _ => {
                self.persist().await;
                self.notify(PASSWORD_RESET, Severity::Success);
            }
        }
        Ok(())
    }

    /// The self-delete check runs before the confirmation is shown.
    pub async fn delete_account(&mut self, id: AccountId) -> Result<(), PortalError> {
        self.authorize(true)?;
        ensure_deletable(&id, self.state.session.identity_id())?;
        if !self.surface.confirm(CONFIRM_DELETE_ACCOUNT).await {
            return Ok(());
        }

        let removed = DeleteAccountUseCase {
            dataset: &mut self.state.dataset,
            current: self.state.session.identity_id(),
        }
        .execute(&id)?;

        if removed {
            self.persist().await;
            self.notify(ACCOUNT_DELETED, Severity::Info);
        } else {
            debug!(account_id = %id, "account already gone");
        }
        self.refresh(Location::Accounts);
        Ok(())
    }
}
