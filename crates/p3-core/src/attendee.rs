//! Attendee identity as seen by the policy crates.

use serde::Serialize;

use crate::errors::CoreError;

/// A site user making a request.
///
/// Anonymous visitors carry no email. Authenticated attendees always have a
/// syntactically plausible email, checked in [`Attendee::authenticated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    email: Option<String>,
    is_superuser: bool,
}

impl Attendee {
    /// An unauthenticated visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            email: None,
            is_superuser: false,
        }
    }

    /// An authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `email` is blank or has no `@`.
    pub fn authenticated(email: impl Into<String>, is_superuser: bool) -> Result<Self, CoreError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(CoreError::Validation("attendee email is empty".into()));
        }
        if !email.contains('@') {
            return Err(CoreError::Validation(format!(
                "attendee email '{email}' has no '@'"
            )));
        }
        Ok(Self {
            email: Some(email),
            is_superuser,
        })
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }

    #[must_use]
    pub const fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Email of an authenticated attendee, `None` for anonymous visitors.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
