use tracing::{info, warn};

use portal_domain::account::{Account, normalize_email};
use portal_domain::dataset::Dataset;
use portal_domain::id::AccountId;

use crate::domain::repository::SlotStore;
use crate::domain::types::AUTH_TOKEN_SLOT;
use crate::error::PortalError;

/// Verified account matching `email` (already normalized).
fn verified_account<'a>(dataset: &'a Dataset, email: &str) -> Option<&'a Account> {
    dataset
        .account_by_email(email)
        .filter(|account| account.verified)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<'a, S: SlotStore> {
    pub store: &'a S,
    pub dataset: &'a Dataset,
}

impl<'a, S: SlotStore> LoginUseCase<'a, S> {
    /// Succeeds only for a verified account with the exact password. Unknown
    /// email, wrong password and unverified account all map to the same error.
    pub async fn execute(&self, input: LoginInput) -> Result<&'a Account, PortalError> {
        let email = normalize_email(&input.email);
        let account = verified_account(self.dataset, &email)
            .filter(|account| account.password == input.password)
            .ok_or(PortalError::InvalidCredentials)?;

        // The in-memory session still works for this run if the token write fails.
        if let Err(e) = self.store.set(AUTH_TOKEN_SLOT, &account.email).await {
            warn!(error = %e, "session token not persisted");
        }
        info!(account_id = %account.id, "logged in");
        Ok(account)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<'a, S: SlotStore> {
    pub store: &'a S,
}

impl<S: SlotStore> LogoutUseCase<'_, S> {
    pub async fn execute(&self) {
        if let Err(e) = self.store.remove(AUTH_TOKEN_SLOT).await {
            warn!(error = %e, "session token not cleared");
        }
        info!("logged out");
    }
}

// ── RestoreSession ───────────────────────────────────────────────────────────

pub struct RestoreSessionUseCase<'a, S: SlotStore> {
    pub store: &'a S,
    pub dataset: &'a Dataset,
}

impl<S: SlotStore> RestoreSessionUseCase<'_, S> {
    /// Resolve the stored token to a verified account. A stale token is
    /// discarded without surfacing an error.
    pub async fn execute(&self) -> Option<AccountId> {
        let token = match self.store.get(AUTH_TOKEN_SLOT).await {
            Ok(token) => token?,
            Err(e) => {
                warn!(error = %e, "session token unreadable");
                return None;
            }
        };

        match verified_account(self.dataset, &token) {
            Some(account) => {
                info!(account_id = %account.id, "session restored");
                Some(account.id.clone())
            }
            None => {
                info!("discarding stale session token");
                if let Err(e) = self.store.remove(AUTH_TOKEN_SLOT).await {
                    warn!(error = %e, "stale session token not cleared");
                }
                None
            }
        }
    }
}
