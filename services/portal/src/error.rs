use std::fmt;

use crate::domain::types::Severity;

/// Where a duplicate email was detected. Each flow words the notice differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailContext {
    Registration,
    NewAccount,
    EditAccount,
}

impl fmt::Display for EmailContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registration => "Email already registered",
            Self::NewAccount => "Email already exists",
            Self::EditAccount => "Email already in use",
        })
    }
}

/// Form input rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in {0}")]
    MissingField(&'static str),
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("{0}")]
    EmailTaken(EmailContext),
    #[error("User email not found in accounts")]
    UnknownUserEmail,
    #[error("{0} must be a date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Please add at least one item")]
    NoItems,
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::UnknownUserEmail => "UNKNOWN_USER_EMAIL",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::NoItems => "NO_ITEMS",
        }
    }
}

/// Durable slot read/write failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage quota exceeded ({needed} of {quota} bytes)")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Portal error variants. None of them is fatal: every one ends up as a toast.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid credentials or unverified email")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("No pending verification")]
    NoPendingVerification,
    #[error("Cannot delete your own account")]
    SelfDelete,
    #[error("Please log in first")]
    NotAuthenticated,
    #[error("Access denied. Admin only.")]
    Forbidden,
    #[error("Error saving data")]
    Storage(#[from] StorageError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.kind(),
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NoPendingVerification => "NO_PENDING_VERIFICATION",
            Self::SelfDelete => "SELF_DELETE",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Storage(_) => "STORAGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoPendingVerification | Self::NotAuthenticated => Severity::Warning,
            _ => Severity::Danger,
        }
    }

    /// Log at the level the failure deserves. Validation and auth denials are
    /// expected user errors; storage and internal failures need the cause.
    pub fn trace(&self) {
        match self {
            Self::Storage(e) => tracing::error!(error = %e, kind = self.kind(), "storage error"),
            Self::Internal(e) => tracing::error!(error = %e, kind = self.kind(), "internal error"),
            _ => tracing::debug!(kind = self.kind(), "rejected"),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(StorageError::Serialize(e))
    }
}
