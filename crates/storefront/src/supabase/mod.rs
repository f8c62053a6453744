//! Client for the hosted database's table-style REST API.
//!
//! Products, orders, and order lines are plain table resources under
//! `/rest/v1/`. Rows use the database's snake_case naming, which differs
//! from the in-memory model (notably the best-seller flag); the [`rows`]
//! module translates in both directions on every read and write.
//!
//! Calls are awaited individually and never retried; callers catch
//! failures and fall back to the local store or a static message.

pub mod rows;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::SupabaseConfig;
use rows::{OrderInsertRow, OrderLineRow, ProductRow};

/// Errors from the hosted database API.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// Transport-level failure (endpoint unreachable, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// A write that should return the created row returned nothing.
    #[error("empty response for {0}")]
    EmptyResponse(&'static str),
}

/// Client for the hosted database's REST API.
///
/// Cheaply cloneable via `Arc`. The anon key authenticates every request;
/// per-user requests additionally carry the user's bearer token.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Create a new client for the configured project.
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
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {anon_key}"))
                .expect("Invalid anon key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                base_url: config.url.clone(),
            }),
        }
    }

    /// URL for a table resource.
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.inner.base_url)
    }

    /// Check the response status, turning non-success into `Api` errors.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(SupabaseError::Api {
            status,
            message: message.chars().take(500).collect(),
        })
    }

    async fn get_rows<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>, SupabaseError> {
        let response = self.inner.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<(), SupabaseError> {
        let response = request.json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch all product rows.
    #[instrument(skip(self))]
    pub async fn select_products(&self) -> Result<Vec<ProductRow>, SupabaseError> {
        self.get_rows(format!("{}?select=*", self.table_url("products")))
            .await
    }

    /// Upsert one product row by primary key.
    #[instrument(skip(self, row), fields(id = %row.id))]
    pub async fn upsert_product(&self, row: &ProductRow) -> Result<(), SupabaseError> {
        let request = self
            .inner
            .client
            .post(self.table_url("products"))
            .header("Prefer", "resolution=merge-duplicates");
        self.write(request, row).await
    }

    /// Insert many product rows (used by the seeding CLI).
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn insert_products(&self, rows: &[ProductRow]) -> Result<(), SupabaseError> {
        let request = self.inner.client.post(self.table_url("products"));
        self.write(request, rows).await
    }

    /// Delete a product row by identifier.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), SupabaseError> {
        let url = format!("{}?id=eq.{id}", self.table_url("products"));
        let response = self.inner.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Insert the order header, returning the stored row's identifier.
    #[instrument(skip(self, row), fields(email = %row.email))]
    pub async fn insert_order(&self, row: &OrderInsertRow) -> Result<String, SupabaseError> {
        let response = self
            .inner
            .client
            .post(self.table_url("orders"))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let created: Vec<rows::OrderCreatedRow> = Self::check(response).await?.json().await?;
        created
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or(SupabaseError::EmptyResponse("orders"))
    }

    /// Insert the order's line rows. Called after the header write; there
    /// is no transaction tying the two together.
    #[instrument(skip(self, lines), fields(count = lines.len()))]
    pub async fn insert_order_lines(&self, lines: &[OrderLineRow]) -> Result<(), SupabaseError> {
        let request = self.inner.client.post(self.table_url("order_items"));
        self.write(request, lines).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: "https://xyz.supabase.co".to_string(),
            anon_key: SecretString::from("kYq3mXw9Zr2bTn8vLp5s"),
        })
    }

    #[test]
    fn test_table_url() {
        let client = test_client();
        assert_eq!(
            client.table_url("products"),
            "https://xyz.supabase.co/rest/v1/products"
        );
    }

    #[test]
    fn test_client_is_clone_send_sync() {
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<SupabaseClient>();
    }
}
