use async_trait::async_trait;
use portal_core::model::{UserId, UserProfile};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::repository::{InMemoryRepository, ProfileRepository, StorageError};

/// A signed-in user as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub email: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    /// Account created; the user has to confirm the address before signing in.
    ConfirmationPending { email: String },
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("email address has not been confirmed")]
    EmailNotConfirmed,

    #[error("auth request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("auth connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Account management against the identity backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` when the address is registered, or
    /// another `AuthError` if the backend refuses the request.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong email/password pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot revoke the session.
    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError>;
}

fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    digest: String,
    confirmed: bool,
}

/// Local accounts for tests and the demo backend. Creates a profile row on
/// sign-up.
#[derive(Clone)]
pub struct InMemoryAuth {
    repo: InMemoryRepository,
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    require_confirmation: bool,
}

impl InMemoryAuth {
    #[must_use]
    pub fn new(repo: InMemoryRepository) -> Self {
        Self {
            repo,
            accounts: Arc::new(Mutex::new(HashMap::new())),
            require_confirmation: false,
        }
    }

    /// New accounts must be confirmed with [`InMemoryAuth::confirm`] first.
    #[must_use]
    pub fn with_email_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown address.
    pub fn confirm(&self, email: &str) -> Result<(), AuthError> {
        let mut guard = self.lock()?;
        let account = guard
            .get_mut(&normalize(email))
            .ok_or(AuthError::InvalidCredentials)?;
        account.confirmed = true;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Account>>, AuthError> {
        self.accounts
            .lock()
            .map_err(|e| AuthError::Connection(e.to_string()))
    }

    fn session(user_id: UserId, email: String) -> AuthSession {
        AuthSession {
            user_id,
            access_token: format!("local-{}", UserId::generate()),
            refresh_token: None,
            email,
        }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthGateway for InMemoryAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let email = normalize(email);
        let user_id = {
            let mut guard = self.lock()?;
            if guard.contains_key(&email) {
                return Err(AuthError::EmailTaken);
            }
            let user_id = UserId::generate();
            guard.insert(
                email.clone(),
                Account {
                    user_id,
                    digest: password_digest(&email, password),
                    confirmed: !self.require_confirmation,
                },
            );
            user_id
        };

        let mut profile = UserProfile::new(user_id, email.clone());
        let name = display_name.trim();
        if !name.is_empty() {
            profile.name = Some(name.to_string());
        }
        self.repo.upsert_profile(&profile).await?;

        if self.require_confirmation {
            Ok(SignUpOutcome::ConfirmationPending { email })
        } else {
            Ok(SignUpOutcome::SignedIn(Self::session(user_id, email)))
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize(email);
        let account = self
            .lock()?
            .get(&email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        if account.digest != password_digest(&email, password) {
            return Err(AuthError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        Ok(Self::session(account.user_id, email))
    }

    async fn sign_out(&self, _session: &AuthSession) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let repo = InMemoryRepository::new();
        let auth = InMemoryAuth::new(repo.clone());

        let SignUpOutcome::SignedIn(session) = auth
            .sign_up("Ada@Example.com", "secret1", "Ada")
            .await
            .unwrap()
        else {
            panic!("expected a live session");
        };
        assert_eq!(session.email, "ada@example.com");

        let again = auth.sign_in("ada@example.com", "secret1").await.unwrap();
        assert_eq!(again.user_id, session.user_id);

        let profile = repo.get_profile(session.user_id).await.unwrap().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.streak_days, 0);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = InMemoryAuth::new(InMemoryRepository::new());
        auth.sign_up("a@b.c", "secret1", "A").await.unwrap();
        let err = auth.sign_in("a@b.c", "secret2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        let err = auth.sign_in("x@b.c", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_taken() {
        let auth = InMemoryAuth::new(InMemoryRepository::new());
        auth.sign_up("a@b.c", "secret1", "A").await.unwrap();
        let err = auth.sign_up(" A@B.C ", "other12", "B").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn confirmation_flow() {
        let auth = InMemoryAuth::new(InMemoryRepository::new()).with_email_confirmation();
        let outcome = auth.sign_up("a@b.c", "secret1", "A").await.unwrap();
        assert_eq!(
            outcome,
            SignUpOutcome::ConfirmationPending {
                email: "a@b.c".into()
            }
        );

        let err = auth.sign_in("a@b.c", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailNotConfirmed));

        auth.confirm("a@b.c").unwrap();
        assert!(auth.sign_in("a@b.c", "secret1").await.is_ok());
    }
}
