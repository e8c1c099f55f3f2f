use tracing::info;

use portal_domain::account::{Account, MIN_PASSWORD_LEN, Role};
use portal_domain::dataset::Dataset;
use portal_domain::id::AccountId;

use crate::domain::types::FormValues;
use crate::error::{EmailContext, PortalError, ValidationError};

// ── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    /// Fields: `firstName`, `lastName`, `email`, `password`.
    pub fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: form.required("firstName")?,
            last_name: form.required("lastName")?,
            email: form.required_email("email")?,
            // Passwords are taken verbatim, surrounding spaces included.
            password: form.raw("password").to_owned(),
        })
    }
}

pub struct RegisterUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl RegisterUseCase<'_> {
    /// Appends a new unverified `User` account. Role and verification are
    /// never taken from input.
    pub fn execute(&mut self, input: RegisterInput) -> Result<AccountId, PortalError> {
        if self.dataset.email_in_use(&input.email, None) {
            return Err(ValidationError::EmailTaken(EmailContext::Registration).into());
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }

        let id = AccountId::generate();
        self.dataset.accounts.push(Account {
            id: id.clone(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            role: Role::User,
            verified: false,
        });
        info!(account_id = %id, "account registered");
        Ok(id)
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl VerifyEmailUseCase<'_> {
    /// Mark the account owning `email` as verified. Leaves the dataset
    /// untouched when no account matches.
    pub fn execute(&mut self, email: &str) -> Result<AccountId, PortalError> {
        let account = self
            .dataset
            .account_by_email_mut(email)
            .ok_or(PortalError::NotFound("Account"))?;
        account.verified = true;
        info!(account_id = %account.id, "email verified");
        Ok(account.id.clone())
    }
}
