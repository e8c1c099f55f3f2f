use tracing::info;

use portal_domain::account::{Account, MIN_PASSWORD_LEN, Role};
use portal_domain::dataset::Dataset;
use portal_domain::id::AccountId;

use crate::domain::types::FormValues;
use crate::error::{EmailContext, PortalError, ValidationError};
use crate::usecase::Saved;

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

// ── SaveAccount ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AccountInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

impl AccountInput {
    /// Fields: `firstName`, `lastName`, `email`, `password`, `role`
    /// (defaults to `User`), `verified` (checkbox, defaults to unchecked).
    pub fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let role = match form.trimmed("role") {
            "" => Role::default(),
            raw => raw
                .parse()
                .map_err(|_| ValidationError::UnknownRole(raw.to_owned()))?,
        };
        Ok(Self {
            first_name: form.required("firstName")?,
            last_name: form.required("lastName")?,
            email: form.required_email("email")?,
            password: form.raw("password").to_owned(),
            role,
            verified: form.checked("verified"),
        })
    }

    /// Current values of `account`, for pre-filling the edit form.
    pub fn to_form(account: &Account) -> FormValues {
        FormValues::new()
            .with("firstName", account.first_name.as_str())
            .with("lastName", account.last_name.as_str())
            .with("email", account.email.as_str())
            .with("password", account.password.as_str())
            .with("role", account.role.as_str())
            .with("verified", account.verified.to_string())
    }
}

pub struct SaveAccountUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl SaveAccountUseCase<'_> {
    /// Create, or overwrite every field of `edit_id`. Email must stay unique
    /// across all other accounts.
    pub fn execute(
        &mut self,
        input: AccountInput,
        edit_id: Option<&AccountId>,
    ) -> Result<Saved<AccountId>, PortalError> {
        check_password(&input.password)?;

        let Some(edit_id) = edit_id else {
            if self.dataset.email_in_use(&input.email, None) {
                return Err(ValidationError::EmailTaken(EmailContext::NewAccount).into());
            }
            let id = AccountId::generate();
            self.dataset.accounts.push(Account {
                id: id.clone(),
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: input.password,
                role: input.role,
                verified: input.verified,
            });
            info!(account_id = %id, "account created");
            return Ok(Saved::Created(id));
        };

        if self.dataset.account(edit_id).is_none() {
            return Ok(Saved::Missing);
        }
        if self.dataset.email_in_use(&input.email, Some(edit_id)) {
            return Err(ValidationError::EmailTaken(EmailContext::EditAccount).into());
        }
        if let Some(account) = self.dataset.account_mut(edit_id) {
            account.first_name = input.first_name;
            account.last_name = input.last_name;
            account.email = input.email;
            account.password = input.password;
            account.role = input.role;
            account.verified = input.verified;
        }
        info!(account_id = %edit_id, "account updated");
        Ok(Saved::Updated(edit_id.clone()))
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl ResetPasswordUseCase<'_> {
    pub fn execute(
        &mut self,
        id: &AccountId,
        new_password: &str,
    ) -> Result<Saved<AccountId>, PortalError> {
        check_password(new_password)?;
        let Some(account) = self.dataset.account_mut(id) else {
            return Ok(Saved::Missing);
        };
        account.password = new_password.to_owned();
        info!(account_id = %id, "password reset");
        Ok(Saved::Updated(id.clone()))
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

/// The signed-in identity can never delete itself, confirmed or not.
pub fn ensure_deletable(id: &AccountId, current: Option<&AccountId>) -> Result<(), PortalError> {
    if current == Some(id) {
        return Err(PortalError::SelfDelete);
    }
    Ok(())
}

pub struct DeleteAccountUseCase<'a> {
    pub dataset: &'a mut Dataset,
    pub current: Option<&'a AccountId>,
}

impl DeleteAccountUseCase<'_> {
    /// Remove the account. Employees and requests pointing at its email are
    /// left dangling. Returns `false` when the id was already gone.
    pub fn execute(&mut self, id: &AccountId) -> Result<bool, PortalError> {
        ensure_deletable(id, self.current)?;
        let removed = self.dataset.remove_account(id);
        if removed {
            info!(account_id = %id, "account deleted");
        }
        Ok(removed)
    }
}
