//! The catalog gateway: three bounded read operations against the managed
//! table store's REST surface.

use serde::de::DeserializeOwned;
use tracing::debug;

use atlas_shared::constants::COMMUNITY_NOTES_LIMIT;
use atlas_shared::models::TastingNote;

use crate::error::{CatalogError, Result};
use crate::models::{CoffeeBean, Roaster};

/// Read operations against the shared catalog.
///
/// Consumed by the views; the sync orchestrator never calls this, since
/// the private journal has no remote path.
#[allow(async_fn_in_trait)]
pub trait CatalogGateway {
    /// Every roaster in the catalog.
    async fn fetch_roasters(&self) -> Result<Vec<Roaster>>;

    /// Every catalog bean.
    async fn fetch_beans(&self) -> Result<Vec<CoffeeBean>>;

    /// The most recent community tasting notes, newest first, capped at
    /// [`COMMUNITY_NOTES_LIMIT`].
    async fn fetch_community_notes(&self) -> Result<Vec<TastingNote>>;
}

/// Gateway for a PostgREST-style table store
/// (`GET {base}/rest/v1/<table>?<query>` with an api-key header).
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCatalogGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base_url)
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &str) -> Result<Vec<T>> {
        let url = self.table_url(table, query);

        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        let rows: Vec<T> = resp.json().await?;
        debug!(table, rows = rows.len(), "catalog rows fetched");
        Ok(rows)
    }
}

impl CatalogGateway for HttpCatalogGateway {
    async fn fetch_roasters(&self) -> Result<Vec<Roaster>> {
        self.get_rows("roasters", "select=*").await
    }

    async fn fetch_beans(&self) -> Result<Vec<CoffeeBean>> {
        self.get_rows("coffee_beans", "select=*").await
    }

    async fn fetch_community_notes(&self) -> Result<Vec<TastingNote>> {
        let query = format!("select=*&order=created_at.desc&limit={COMMUNITY_NOTES_LIMIT}");
        self.get_rows("tasting_notes", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_joins_base_and_query() {
        let gw = HttpCatalogGateway::new("https://db.example.com", "key");
        assert_eq!(
            gw.table_url("roasters", "select=*"),
            "https://db.example.com/rest/v1/roasters?select=*"
        );
    }

    #[test]
    fn trailing_slash_on_base_url_is_trimmed() {
        let gw = HttpCatalogGateway::new("https://db.example.com/", "key");
        assert_eq!(
            gw.table_url("coffee_beans", "select=*"),
            "https://db.example.com/rest/v1/coffee_beans?select=*"
        );
    }

    #[test]
    fn community_notes_query_is_bounded_and_newest_first() {
        let query = format!("select=*&order=created_at.desc&limit={COMMUNITY_NOTES_LIMIT}");
        assert_eq!(query, "select=*&order=created_at.desc&limit=50");
    }
}
