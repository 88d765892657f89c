use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::DatabaseError;

/// PostgREST client for the relational store.
///
/// Tables are addressed as `/rest/v1/<table>` and filtered with
/// PostgREST operators (`column=eq.value`, `column=gte.value`, ...).
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap, DatabaseError> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.service_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_key))?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => DatabaseError::Unauthorized(error_text),
                404 => DatabaseError::NotFound(error_text),
                409 => DatabaseError::Conflict(error_text),
                code => DatabaseError::Api { status: code, message: error_text },
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// `GET /rest/v1/<table>?<query>` returning every matching row.
    pub async fn select<T>(&self, table: &str, query: &str) -> Result<Vec<T>, DatabaseError>
    where T: DeserializeOwned {
        let path = rest_path(table, query);
        let rows: Vec<Value> = self.request(Method::GET, &path, None).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DatabaseError::from))
            .collect()
    }

    /// Like [`select`](Self::select) but limited to the first row.
    pub async fn select_one<T>(&self, table: &str, query: &str) -> Result<Option<T>, DatabaseError>
    where T: DeserializeOwned {
        let query = if query.is_empty() {
            "limit=1".to_string()
        } else {
            format!("{}&limit=1", query)
        };

        let mut rows = self.select(table, &query).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    /// Inserts a row and returns its stored representation.
    pub async fn insert<T>(&self, table: &str, row: Value) -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        let path = rest_path(table, "");
        let rows: Vec<Value> = self.request_with_headers(
            Method::POST,
            &path,
            Some(row),
            Some(return_representation()),
        ).await?;

        first_row(rows, table)
    }

    /// Patches the rows matching `query` and returns the first updated row.
    pub async fn update<T>(&self, table: &str, query: &str, changes: Value) -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        let path = rest_path(table, query);
        let rows: Vec<Value> = self.request_with_headers(
            Method::PATCH,
            &path,
            Some(changes),
            Some(return_representation()),
        ).await?;

        first_row(rows, table)
    }
}

/// Encodes a value for use inside a PostgREST filter.
pub fn filter_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn rest_path(table: &str, query: &str) -> String {
    if query.is_empty() {
        format!("/rest/v1/{}", table)
    } else {
        format!("/rest/v1/{}?{}", table, query)
    }
}

fn return_representation() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}

fn first_row<T: DeserializeOwned>(mut rows: Vec<Value>, table: &str) -> Result<T, DatabaseError> {
    if rows.is_empty() {
        return Err(DatabaseError::EmptyResult(table.to_string()));
    }

    Ok(serde_json::from_value(rows.swap_remove(0))?)
}
