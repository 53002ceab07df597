use std::sync::{Arc, RwLock};

use portal_core::model::Viewer;
use storage::{AuthGateway, AuthSession, SignUpOutcome};
use tracing::{info, warn};

use crate::error::AuthServiceError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Result of a sign-up attempt that the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpResult {
    SignedIn(Viewer),
    ConfirmationPending { email: String },
}

/// Holds the current session and turns it into an explicit `Viewer`.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<RwLock<Option<AuthSession>>>,
}

fn validate_email(email: &str) -> Result<(), AuthServiceError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthServiceError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            session: Arc::new(RwLock::new(None)),
        }
    }

    #[must_use]
    pub fn viewer(&self) -> Viewer {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| Viewer::SignedIn(s.user_id)))
            .unwrap_or(Viewer::Anonymous)
    }

    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.email.clone()))
    }

    /// Check sign-in form input without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate_sign_in(email: &str, password: &str) -> Result<(), AuthServiceError> {
        validate_email(email)?;
        validate_password(password)
    }

    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate_sign_up(
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(), AuthServiceError> {
        validate_email(email)?;
        validate_password(password)?;
        if display_name.trim().is_empty() {
            return Err(AuthServiceError::MissingName);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a validation error or `AuthServiceError::Auth` from the backend.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Viewer, AuthServiceError> {
        Self::validate_sign_in(email, password)?;
        let session = self.gateway.sign_in(email.trim(), password).await?;
        info!(user_id = %session.user_id, "signed in");
        Ok(self.store(session))
    }

    /// # Errors
    ///
    /// Returns a validation error or `AuthServiceError::Auth` from the backend.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpResult, AuthServiceError> {
        Self::validate_sign_up(email, password, display_name)?;
        let outcome = self
            .gateway
            .sign_up(email.trim(), password, display_name.trim())
            .await?;
        Ok(match outcome {
            SignUpOutcome::SignedIn(session) => {
                info!(user_id = %session.user_id, "signed up");
                SignUpResult::SignedIn(self.store(session))
            }
            SignUpOutcome::ConfirmationPending { email } => {
                info!("sign up awaiting email confirmation");
                SignUpResult::ConfirmationPending { email }
            }
        })
    }

    /// Forgets the local session, then tells the backend.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Auth` if the backend rejects the sign-out.
    /// The viewer is anonymous afterwards either way.
    pub async fn sign_out(&self) -> Result<(), AuthServiceError> {
        let previous = self.session.write().ok().and_then(|mut guard| guard.take());
        let Some(session) = previous else {
            return Ok(());
        };
        if let Err(err) = self.gateway.sign_out(&session).await {
            warn!(error = %err, "backend sign out failed");
            return Err(err.into());
        }
        info!(user_id = %session.user_id, "signed out");
        Ok(())
    }

    fn store(&self, session: AuthSession) -> Viewer {
        let viewer = Viewer::SignedIn(session.user_id);
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
        viewer
    }
}
