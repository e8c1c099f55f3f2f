use tracing::debug;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{
    Container, EMAIL_VERIFIED_SLOT, FormValues, Severity, UNVERIFIED_EMAIL_SLOT,
};
use crate::error::PortalError;
use crate::router::Location;
use crate::state::Portal;
use crate::usecase::registration::{RegisterInput, RegisterUseCase, VerifyEmailUseCase};
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase};

pub const REGISTERED: &str = "Account created! Please verify your email.";
pub const VERIFIED: &str = "Email verified successfully!";
pub const LOGGED_IN: &str = "Login successful!";
pub const LOGGED_OUT: &str = "Logged out successfully";

impl<S: SlotStore, U: Surface> Portal<S, U> {
    pub async fn register(&mut self) -> Result<(), PortalError> {
        let input = RegisterInput::from_form(&self.surface.read_form(Container::RegisterForm))?;
        let email = input.email.clone();
        RegisterUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(input)?;

        self.persist().await;
        self.write_slot(UNVERIFIED_EMAIL_SLOT, &email).await;
        self.notify(REGISTERED, Severity::Success);
        self.go(Location::VerifyEmail).await;
        Ok(())
    }

    /// Simulated "click the link in the email" for the pending address.
    pub async fn verify_email(&mut self) -> Result<(), PortalError> {
        let email = self
            .read_slot(UNVERIFIED_EMAIL_SLOT)
            .await
            .filter(|email| !email.is_empty())
            .ok_or(PortalError::NoPendingVerification)?;
        VerifyEmailUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(&email)?;

        self.persist().await;
        self.clear_slot(UNVERIFIED_EMAIL_SLOT).await;
        self.write_slot(EMAIL_VERIFIED_SLOT, "true").await;
        self.notify(VERIFIED, Severity::Success);
        self.go(Location::Login).await;
        Ok(())
    }

    pub async fn login(&mut self) -> Result<(), PortalError> {
        let form = self.surface.read_form(Container::LoginForm);
        let id = LoginUseCase {
            store: &self.store,
            dataset: &self.state.dataset,
        }
        .execute(LoginInput {
            email: form.raw("email").to_owned(),
            password: form.raw("password").to_owned(),
        })
        .await?
        .id
        .clone();

        self.state.session.establish(id);
        self.push_session_flags();
        self.surface.fill_form(Container::LoginForm, &FormValues::new());
        self.notify(LOGGED_IN, Severity::Success);
        self.go(Location::Profile).await;
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), PortalError> {
        if self.state.session.identity_id().is_none() {
            debug!("logout without session");
        }
        LogoutUseCase { store: &self.store }.execute().await;
        self.state.session.clear();
        self.push_session_flags();
        self.notify(LOGGED_OUT, Severity::Info);
        self.go(Location::Home).await;
        Ok(())
    }
}
