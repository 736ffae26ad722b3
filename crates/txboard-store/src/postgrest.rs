//! PostgREST (Supabase) transaction source

use crate::{StoreError, StoreResult, Transaction, TransactionSource};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;

/// REST client for a PostgREST-compatible table
pub struct PostgrestSource {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
    table: String,
    owner_column: String,
}

impl PostgrestSource {
    pub fn new(base_url: String, api_key: Option<String>, table: String, owner_column: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
            owner_column,
        }
    }

    /// Endpoint for the configured table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn create_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(ref key) = self.api_key {
            let invalid = |e: reqwest::header::InvalidHeaderValue| StoreError::Network {
                message: format!("Failed to create auth header: {}", e),
            };
            headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?,
            );
        }

        Ok(headers)
    }

    async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!("PostgREST request failed with {}: {}", status, body);
        Err(StoreError::from_status(status.as_u16(), body))
    }
}

/// Build an `eq.` filter value
pub fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

/// Build an `in.(...)` filter value, quoting every id.
///
/// Quotes and backslashes inside ids are escaped so commas and parentheses
/// in ids cannot split the list.
pub fn in_filter(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[async_trait]
impl TransactionSource for PostgrestSource {
    async fn fetch_all(&self, owner_id: &str) -> StoreResult<Vec<Option<Transaction>>> {
        log::debug!("GET {} for owner {}", self.table_url(), owner_id);
        let response = self
            .http_client
            .get(self.table_url())
            .headers(self.create_headers()?)
            .query(&[("select", "*".to_string()), (self.owner_column.as_str(), eq_filter(owner_id))])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let rows = response.json::<Vec<Option<Transaction>>>().await?;
        Ok(rows)
    }

    async fn delete_by_ids(&self, ids: &[String]) -> StoreResult<()> {
        log::debug!("DELETE {} ids={:?}", self.table_url(), ids);
        let response = self
            .http_client
            .delete(self.table_url())
            .headers(self.create_headers()?)
            .query(&[("id", in_filter(ids))])
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
