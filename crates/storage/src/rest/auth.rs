use async_trait::async_trait;
use portal_core::model::UserId;
use reqwest::{Method, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SupabaseClient;
use crate::auth::{AuthError, AuthGateway, AuthSession, SignUpOutcome};

/// `GoTrue` gateway. A successful sign-in hands its access token to the
/// shared client so row-level security sees the user.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: UserId,
    email: Option<String>,
}

/// Sign-up answers with a session when confirmation is off, or with the bare
/// user object when it is on.
#[derive(Debug, Deserialize)]
struct GoTrueResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<GoTrueUser>,
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
}

impl GoTrueError {
    fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_default()
    }

    fn into_auth_error(self, status: u16) -> AuthError {
        let code = self.error_code.as_deref().or(self.error.as_deref());
        let message = self.message();
        match code {
            Some("user_already_exists" | "email_exists") => AuthError::EmailTaken,
            Some("email_not_confirmed") => AuthError::EmailNotConfirmed,
            Some("invalid_credentials" | "invalid_grant") => AuthError::InvalidCredentials,
            _ if message.contains("already registered") => AuthError::EmailTaken,
            _ => AuthError::Rejected { status, message },
        }
    }
}

fn session_from(response: GoTrueResponse, fallback_email: &str) -> Option<AuthSession> {
    let access_token = response.access_token?;
    let user = response.user?;
    Some(AuthSession {
        user_id: user.id,
        email: user.email.unwrap_or_else(|| fallback_email.to_string()),
        access_token,
        refresh_token: response.refresh_token,
    })
}

fn sign_up_outcome(response: GoTrueResponse, email: &str) -> SignUpOutcome {
    let pending_email = response
        .email
        .clone()
        .or_else(|| response.user.as_ref().and_then(|u| u.email.clone()))
        .unwrap_or_else(|| email.to_string());
    match session_from(response, email) {
        Some(session) => SignUpOutcome::SignedIn(session),
        None => SignUpOutcome::ConfirmationPending {
            email: pending_email,
        },
    }
}

async fn read_error(response: Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let parsed: GoTrueError = serde_json::from_str(&body).unwrap_or_default();
    parsed.into_auth_error(status)
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Connection(err.to_string())
}

impl SupabaseAuth {
    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GoTrueResponse, AuthError> {
        let response = self
            .client
            .request(Method::POST, self.client.auth_url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(read_error(response).await);
        }
        response
            .json::<GoTrueResponse>()
            .await
            .map_err(|e| AuthError::Connection(e.to_string()))
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let request = SignUpRequest {
            email,
            password,
            data: SignUpMetadata { name: display_name },
        };
        let response = self.post("signup", &request).await?;
        let outcome = sign_up_outcome(response, email);
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.client
                .set_access_token(Some(session.access_token.clone()));
        }
        debug!(confirmed = matches!(outcome, SignUpOutcome::SignedIn(_)), "sign up");
        Ok(outcome)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .post("token?grant_type=password", &Credentials { email, password })
            .await?;
        let session = session_from(response, email).ok_or_else(|| AuthError::Rejected {
            status: 200,
            message: "response carried no session".into(),
        })?;
        self.client
            .set_access_token(Some(session.access_token.clone()));
        Ok(session)
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError> {
        self.client.set_access_token(None);
        let response = self
            .client
            .request(Method::POST, self.client.auth_url("logout"))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            let err = read_error(response).await;
            warn!(error = %err, "sign out rejected");
            return Err(err);
        }
        Ok(())
    }
}
