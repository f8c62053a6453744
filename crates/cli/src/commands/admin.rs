//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! loop-cli admin create -e admin@example.com -p <password> -n "Admin Name"
//! ```
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Hosted backend endpoint
//! - `SUPABASE_ANON_KEY` - Public API key

use loop_core::identity::Role;
use loop_storefront::services::auth::AuthClient;

use super::{CommandError, require_backend};

/// Create a new admin account.
///
/// The role lands in the signup metadata, which the hosted side copies
/// into the profile row.
///
/// # Errors
///
/// Fails when no backend is configured or when the signup is rejected,
/// including when the email is already taken.
#[allow(clippy::print_stdout)]
pub async fn create_account(
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), CommandError> {
    let config = require_backend()?;
    let client = AuthClient::new(&config);

    client.sign_up(email, password, name, Role::Admin).await?;

    tracing::info!(email, "Admin account created");
    println!("Admin account created for {email}.");
    Ok(())
}
