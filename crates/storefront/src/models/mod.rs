//! Session-scoped models shared across route handlers.

use serde::{Deserialize, Serialize};

use loop_core::identity::Profile;

/// Keys under which state is stored in the session.
pub mod session_keys {
    /// The signed-in user and their access token.
    pub const CURRENT_USER: &str = "loop_user";
    /// The cart lines.
    pub const CART: &str = "loop_cart";
}

/// The signed-in user as kept in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub profile: Profile,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_core::identity::Role;

    #[test]
    fn test_current_user_round_trips_through_session_json() {
        let user = CurrentUser {
            profile: Profile {
                id: "u1".to_string(),
                email: "a@b.c".to_string(),
                full_name: Some("Ada".to_string()),
                role: Role::Customer,
            },
            access_token: "jwt".to_string(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        let back: CurrentUser = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.profile.id, "u1");
        assert_eq!(back.access_token, "jwt");
    }
}
