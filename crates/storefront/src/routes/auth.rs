//! Auth route handlers.
//!
//! Sessions are established against the hosted auth service and mirrored
//! into the local session store. Without a hosted backend, auth endpoints
//! report the service unavailable.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use loop_core::identity::{Profile, Role};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthClient, AuthError};
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The session user as returned to the client. Never includes the token.
#[derive(Serialize)]
pub struct UserBody {
    pub user: Option<Profile>,
}

fn require_auth_client(state: &AppState) -> Result<&AuthClient> {
    state
        .auth()
        .ok_or_else(|| AppError::Unavailable("Accounts are not available".to_string()))
}

/// Sign in against the hosted service and mirror the result into the
/// local session.
async fn establish_session(
    auth: &AuthClient,
    session: &Session,
    email: &str,
    password: &str,
) -> Result<Profile> {
    let remote = auth.sign_in(email, password).await?;

    let profile = match auth
        .fetch_profile(&remote.access_token, &remote.user.id)
        .await
    {
        Ok(profile) => profile,
        // The profile row is created by a trigger and can lag the signup
        Err(AuthError::ProfileNotFound) => Profile {
            id: remote.user.id.clone(),
            email: remote.user.email.clone(),
            full_name: None,
            role: Role::Customer,
        },
        Err(e) => return Err(e.into()),
    };

    let user = CurrentUser {
        profile: profile.clone(),
        access_token: remote.access_token,
    };
    set_current_user(session, &user).await?;
    set_sentry_user(&profile.id, Some(&profile.email));

    Ok(profile)
}

/// POST /auth/register - create a customer account and sign in.
#[instrument(skip(state, session, body))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserBody>)> {
    let auth = require_auth_client(&state)?;

    auth.sign_up(&body.email, &body.password, &body.full_name, Role::Customer)
        .await?;
    let profile = establish_session(auth, &session, &body.email, &body.password).await?;

    tracing::info!(user_id = %profile.id, "Account created");
    Ok((StatusCode::CREATED, Json(UserBody { user: Some(profile) })))
}

/// POST /auth/login - sign in with email and password.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserBody>> {
    let auth = require_auth_client(&state)?;
    let profile = establish_session(auth, &session, &body.email, &body.password).await?;

    tracing::info!(user_id = %profile.id, "Signed in");
    Ok(Json(UserBody { user: Some(profile) }))
}

/// POST /auth/logout - sign out.
///
/// The local session is always cleared; remote token revocation is
/// best-effort.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Json<UserBody>> {
    let user = clear_current_user(&session).await?;
    clear_sentry_user();

    if let (Some(auth), Some(user)) = (state.auth(), user) {
        if let Err(e) = auth.sign_out(&user.access_token).await {
            tracing::warn!(error = %e, "Remote sign-out failed");
        }
    }

    Ok(Json(UserBody { user: None }))
}

/// GET /auth/me - the current session user, if any.
#[instrument(skip(user))]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<UserBody> {
    Json(UserBody {
        user: user.map(|u| u.profile),
    })
}
