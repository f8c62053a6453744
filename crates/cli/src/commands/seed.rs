//! Seed the hosted products table from the built-in list.
//!
//! Refuses to run when the table already has rows so a re-run cannot
//! duplicate the catalog.
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Hosted backend endpoint
//! - `SUPABASE_ANON_KEY` - Public API key

use loop_core::seed;
use loop_storefront::supabase::SupabaseClient;
use loop_storefront::supabase::rows::ProductRow;

use super::{CommandError, require_backend};

/// Run the seed command.
///
/// # Errors
///
/// Fails when no backend is configured, when the table already has rows,
/// or when the insert is rejected.
#[allow(clippy::print_stdout)]
pub async fn run() -> Result<(), CommandError> {
    let config = require_backend()?;
    let client = SupabaseClient::new(&config);

    let existing = client.select_products().await?;
    if !existing.is_empty() {
        return Err(CommandError::AlreadySeeded(existing.len()));
    }

    let rows: Vec<ProductRow> = seed::initial_products()
        .into_iter()
        .map(ProductRow::from)
        .collect();
    let count = rows.len();
    client.insert_products(&rows).await?;

    tracing::info!(count, "Seeded products table");
    println!("Seeded {count} products.");
    Ok(())
}
