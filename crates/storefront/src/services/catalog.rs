//! The catalog store: remote-first product repository with a local
//! fallback cache.
//!
//! Callers never branch on which backing store is active. When a remote
//! backend is configured it is tried first; an unreachable endpoint or an
//! empty result falls through to the local cache, which is seeded on
//! first use from the built-in product list.

use loop_core::product::Product;
use loop_core::seed;
use tracing::instrument;
use uuid::Uuid;

use crate::storage::{LocalStore, keys};
use crate::supabase::SupabaseClient;
use crate::supabase::rows::ProductRow;

/// Errors from the catalog store.
///
/// Remote failures never surface here; they are logged and absorbed by
/// the fallback path. What remains is the local cache's own I/O.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("local store error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Product repository, system of record for the catalog.
#[derive(Clone)]
pub struct CatalogStore {
    remote: Option<SupabaseClient>,
    local: LocalStore,
}

impl CatalogStore {
    /// Create a store. `remote` is `None` when no hosted backend is
    /// configured, leaving the local cache as the only path.
    #[must_use]
    pub const fn new(remote: Option<SupabaseClient>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    /// Fetch the full product list.
    ///
    /// Remote first; unreachable or empty falls back to the local cache,
    /// seeding it from the built-in list on first use.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local cache cannot be written while
    /// seeding.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, RepositoryError> {
        if let Some(remote) = &self.remote {
            match remote.select_products().await {
                Ok(rows) if !rows.is_empty() => {
                    return Ok(rows.into_iter().map(Product::from).collect());
                }
                Ok(_) => {
                    tracing::debug!("Remote products table is empty, using local cache");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Remote product fetch failed, using local cache");
                }
            }
        }

        self.local_products()
    }

    /// Upsert a product by identifier and return the refreshed list.
    ///
    /// A product with an empty identifier is treated as new. On the local
    /// path, an identifier with no match is appended with a freshly
    /// generated identifier, mirroring the remote upsert.
    ///
    /// # Errors
    ///
    /// Returns an error if the local cache cannot be updated.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn save_product(&self, product: Product) -> Result<Vec<Product>, RepositoryError> {
        if let Some(remote) = &self.remote {
            let row = ProductRow::from(product.clone());
            match remote.upsert_product(&row).await {
                Ok(()) => return self.get_products().await,
                Err(e) => {
                    tracing::warn!(error = %e, "Remote product upsert failed, using local cache");
                }
            }
        }

        let mut products = self.local_products()?;
        if let Some(existing) = products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        } else {
            let mut appended = product;
            appended.id = Uuid::new_v4().to_string();
            products.push(appended);
        }
        self.local.write_array(keys::PRODUCTS, &products)?;
        Ok(products)
    }

    /// Delete a product by identifier and return the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns an error if the local cache cannot be updated.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<Vec<Product>, RepositoryError> {
        if let Some(remote) = &self.remote {
            match remote.delete_product(id).await {
                Ok(()) => return self.get_products().await,
                Err(e) => {
                    tracing::warn!(error = %e, "Remote product delete failed, using local cache");
                }
            }
        }

        let mut products = self.local_products()?;
        products.retain(|p| p.id != id);
        self.local.write_array(keys::PRODUCTS, &products)?;
        Ok(products)
    }

    /// Linear lookup over the full list.
    ///
    /// # Errors
    ///
    /// Propagates local cache errors from [`CatalogStore::get_products`].
    pub async fn get_product_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .get_products()
            .await?
            .into_iter()
            .find(|p| p.id == id))
    }

    fn seed_local(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = seed::initial_products();
        self.local.write_array(keys::PRODUCTS, &products)?;
        Ok(products)
    }

    fn local_products(&self) -> Result<Vec<Product>, RepositoryError> {
        match self.local.read_array::<Product>(keys::PRODUCTS) {
            Some(products) => Ok(products),
            None => self.seed_local(),
        }
    }
}
