//! CLI command implementations.

pub mod admin;
pub mod seed;

use loop_storefront::config::{ConfigError, StorefrontConfig, SupabaseConfig};
use thiserror::Error;

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "No hosted backend configured. Set SUPABASE_URL and SUPABASE_ANON_KEY and try again."
    )]
    NoBackend,

    #[error("Products table already has {0} rows; refusing to seed")]
    AlreadySeeded(usize),

    #[error("Backend error: {0}")]
    Supabase(#[from] loop_storefront::supabase::SupabaseError),

    #[error("Auth error: {0}")]
    Auth(#[from] loop_storefront::services::auth::AuthError),
}

/// Load the hosted backend configuration or fail with a clear message.
fn require_backend() -> Result<SupabaseConfig, CommandError> {
    let config = StorefrontConfig::from_env()?;
    config.supabase.ok_or(CommandError::NoBackend)
}
