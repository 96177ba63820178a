//! GoTrue (Supabase Auth) REST client.
//!
//! Covers the four calls the session manager needs: password sign-up, password
//! sign-in, refresh-token exchange, and logout. Every request carries the
//! project's anon key in the `apikey` header.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::types::{Session, User};
use crate::util::clock;

/// Result of a sign-up call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The provider auto-confirmed the account and issued a session.
    SignedIn(Session),
    /// The user must follow the emailed confirmation link first.
    ConfirmationRequired,
}

/// Identity operations delegated to the auth provider.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct GoTrueClient {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(auth_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), auth_url: auth_url.into(), anon_key: anon_key.into() }
    }

    async fn post<B: Serialize>(&self, path: &str, bearer: Option<&str>, body: &B) -> Result<String, AuthError> {
        let token = bearer.unwrap_or(&self.anon_key);
        let response = self
            .http
            .post(auth_endpoint(&self.auth_url, path))
            .header("apikey", &self.anon_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::from_response(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let text = self
            .post(SIGN_UP_PATH, None, &Credentials { email, password })
            .await?;
        parse_sign_up(&text, clock::now_secs())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let text = self
            .post(PASSWORD_GRANT_PATH, None, &Credentials { email, password })
            .await?;
        parse_session(&text, clock::now_secs())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let text = self
            .post(REFRESH_GRANT_PATH, None, &RefreshRequest { refresh_token })
            .await?;
        parse_session(&text, clock::now_secs())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.post(LOGOUT_PATH, Some(access_token), &serde_json::json!({}))
            .await?;
        Ok(())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

const SIGN_UP_PATH: &str = "/auth/v1/signup";
const PASSWORD_GRANT_PATH: &str = "/auth/v1/token?grant_type=password";
const REFRESH_GRANT_PATH: &str = "/auth/v1/token?grant_type=refresh_token";
const LOGOUT_PATH: &str = "/auth/v1/logout";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.saturating_add(secs)));
        Session { access_token: self.access_token, refresh_token: self.refresh_token, expires_at, user: self.user }
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn auth_endpoint(auth_url: &str, path: &str) -> String {
    format!("{auth_url}{path}")
}

fn parse_session(text: &str, now: i64) -> Result<Session, AuthError> {
    let token: TokenResponse = serde_json::from_str(text).map_err(|e| AuthError::Parse(e.to_string()))?;
    Ok(token.into_session(now))
}

fn parse_sign_up(text: &str, now: i64) -> Result<SignUpOutcome, AuthError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| AuthError::Parse(e.to_string()))?;
    if value.get("access_token").is_some() {
        return parse_session(text, now).map(SignUpOutcome::SignedIn);
    }
    if value.get("id").is_some() || value.get("user").is_some() {
        return Ok(SignUpOutcome::ConfirmationRequired);
    }
    Err(AuthError::Parse("sign-up response had neither a session nor a user".to_owned()))
}
