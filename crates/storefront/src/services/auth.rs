//! Client for the hosted auth service.
//!
//! Credential sign-up/sign-in, sign-out, and profile retrieval over the
//! service's REST API. Sign-up attaches the display name and role as user
//! metadata; a trigger on the hosted side creates the matching `profiles`
//! row. The storefront keeps the resulting profile and access token in
//! the session.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loop_core::identity::{Profile, Role};

use crate::config::SupabaseConfig;

/// Errors from the hosted auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// The session's user has no profile row.
    #[error("profile not found")]
    ProfileNotFound,

    /// Any other API error.
    #[error("auth API error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// An established session with the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// The auth service's view of an account.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the hosted auth service.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client for the configured project.
    ///
    /// # Panics
    ///
    /// Panics if the anon key contains invalid header characters.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let anon_key = config.anon_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(anon_key).expect("Invalid anon key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AuthClientInner {
                client,
                base_url: config.url.clone(),
            }),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.inner.base_url)
    }

    /// Create a credential account with display name and role metadata.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the email is taken, otherwise transport or
    /// API errors.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<(), AuthError> {
        let body = SignUpRequest {
            email,
            password,
            data: SignUpMetadata { full_name, role },
        };
        let response = self
            .inner
            .client
            .post(self.auth_url("signup"))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::CONFLICT => {
                Err(AuthError::AlreadyExists)
            }
            status => Err(api_error(status, response).await),
        }
    }

    /// Exchange email/password for a session.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on a rejected pair, otherwise transport or
    /// API errors.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let body = PasswordGrantRequest { email, password };
        let response = self
            .inner
            .client
            .post(format!("{}?grant_type=password", self.auth_url("token")))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(AuthError::InvalidCredentials)
            }
            status => Err(api_error(status, response).await),
        }
    }

    /// Revoke the session's token. Best-effort; the local session is
    /// cleared regardless.
    ///
    /// # Errors
    ///
    /// Transport or API errors.
    #[instrument(skip(self, access_token))]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .inner
            .client
            .post(self.auth_url("logout"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(api_error(status, response).await)
        }
    }

    /// Fetch the profile row for the session's user, authorized with the
    /// user's own token so row-level rules apply.
    ///
    /// # Errors
    ///
    /// `ProfileNotFound` when no row matches, otherwise transport or API
    /// errors.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_profile(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Profile, AuthError> {
        let url = format!(
            "{}/rest/v1/profiles?id=eq.{user_id}&select=*",
            self.inner.base_url
        );
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let mut profiles: Vec<Profile> = response.json().await?;
        profiles.pop().ok_or(AuthError::ProfileNotFound)
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> AuthError {
    let message = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(500)
        .collect();
    AuthError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> AuthClient {
        AuthClient::new(&SupabaseConfig {
            url: "https://xyz.supabase.co".to_string(),
            anon_key: SecretString::from("kYq3mXw9Zr2bTn8vLp5s"),
        })
    }

    #[test]
    fn test_auth_url() {
        let client = test_client();
        assert_eq!(
            client.auth_url("signup"),
            "https://xyz.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_sign_up_metadata_shape() {
        let body = SignUpRequest {
            email: "a@b.c",
            password: "pw",
            data: SignUpMetadata {
                full_name: "Ada",
                role: Role::Admin,
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["data"]["full_name"], "Ada");
        assert_eq!(json["data"]["role"], "admin");
    }

    #[test]
    fn test_session_parses_token_response() {
        let json = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "user": { "id": "u1", "email": "a@b.c", "aud": "authenticated" }
        }"#;
        let session: AuthSession = serde_json::from_str(json).expect("parse");
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.user.id, "u1");
    }
}
