//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::assistant::AssistantClient;
use crate::services::auth::AuthClient;
use crate::services::catalog::CatalogStore;
use crate::storage::LocalStore;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    supabase: Option<SupabaseClient>,
    auth: Option<AuthClient>,
    assistant: Option<AssistantClient>,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// Clients for the hosted backend and the assistant endpoint are only
    /// constructed when their configuration is present; everything else
    /// runs against the local store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let supabase = config.supabase.as_ref().map(SupabaseClient::new);
        let auth = config.supabase.as_ref().map(AuthClient::new);
        let assistant = config.assistant.as_ref().map(AssistantClient::new);

        let local = LocalStore::new(config.data_dir.clone());
        let catalog = CatalogStore::new(supabase.clone(), local);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                supabase,
                auth,
                assistant,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get the hosted database client, if configured.
    #[must_use]
    pub fn supabase(&self) -> Option<&SupabaseClient> {
        self.inner.supabase.as_ref()
    }

    /// Get the auth client, if configured.
    #[must_use]
    pub fn auth(&self) -> Option<&AuthClient> {
        self.inner.auth.as_ref()
    }

    /// Get the assistant client, if configured.
    #[must_use]
    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.inner.assistant.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_without_remote_backends() {
        let config = StorefrontConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: std::env::temp_dir().join("loop-state-test"),
            supabase: None,
            assistant: None,
            sentry_dsn: None,
        };
        let state = AppState::new(config);
        assert!(state.supabase().is_none());
        assert!(state.auth().is_none());
        assert!(state.assistant().is_none());
    }
}
