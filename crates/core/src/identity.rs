//! Profiles, roles, and the session state machine.
//!
//! The gate starts `Unresolved` while the initial session check is in
//! flight, then settles into `Anonymous` or `Authenticated`. Auth-change
//! events (sign-in, sign-out, token refresh) drive the same transition for
//! the lifetime of the gate. Pages requiring admin access consult
//! [`IdentityGate::admin_access`] and render the matching view.

use serde::{Deserialize, Serialize};

/// Access role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// A user profile, created alongside the auth account and fetched when a
/// session is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
}

/// Session/profile state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Initial state; the session check has not completed yet.
    #[default]
    Unresolved,
    /// No active session.
    Anonymous,
    /// Session established and profile loaded.
    Authenticated(Profile),
}

/// An auth-state-change notification from the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Profile),
    TokenRefreshed(Profile),
    SignedOut,
}

/// Outcome of the admin access decision for a role-gated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    /// Session check still in flight; render a loading indicator.
    Loading,
    /// No session; redirect to the login screen.
    RedirectToLogin,
    /// Authenticated but not an admin; render a 403-style denial.
    Denied,
    Granted,
}

/// Wraps session/profile state and derives access decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityGate {
    state: AuthState,
}

impl IdentityGate {
    /// A gate in the initial `Unresolved` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AuthState::Unresolved,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Settle the initial session check: a present profile moves the gate
    /// to `Authenticated`, absence to `Anonymous`.
    pub fn resolve(&mut self, profile: Option<Profile>) {
        self.state = profile.map_or(AuthState::Anonymous, AuthState::Authenticated);
    }

    /// Apply an auth-state-change event. Sign-in and token refresh carry
    /// the session's profile; sign-out clears it.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(profile) | AuthEvent::TokenRefreshed(profile) => {
                self.state = AuthState::Authenticated(profile);
            }
            AuthEvent::SignedOut => self.state = AuthState::Anonymous,
        }
    }

    /// The loaded profile, if authenticated.
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        match &self.state {
            AuthState::Authenticated(profile) => Some(profile),
            AuthState::Unresolved | AuthState::Anonymous => None,
        }
    }

    /// Whether the loaded profile has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.profile().is_some_and(|p| p.role == Role::Admin)
    }

    /// Access decision for admin-only pages.
    #[must_use]
    pub fn admin_access(&self) -> AdminAccess {
        match &self.state {
            AuthState::Unresolved => AdminAccess::Loading,
            AuthState::Anonymous => AdminAccess::RedirectToLogin,
            AuthState::Authenticated(profile) => {
                if profile.role == Role::Admin {
                    AdminAccess::Granted
                } else {
                    AdminAccess::Denied
                }
            }
        }
    }
}
