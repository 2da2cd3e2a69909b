use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;

use super::{AppointmentStore, ClientConnector};
use crate::errors::BookingError;
use crate::models::BookingRequest;

/// Connects to a Supabase project's REST endpoint with the public anon key.
pub struct SupabaseConnector {
    project_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseConnector {
    pub fn new(project_url: String, anon_key: String, table: String) -> Self {
        Self {
            project_url,
            anon_key,
            table,
        }
    }
}

#[async_trait]
impl ClientConnector for SupabaseConnector {
    async fn connect(&self) -> Result<Arc<dyn AppointmentStore>, BookingError> {
        let client = SupabaseClient::new(&self.project_url, &self.anon_key, &self.table)?;
        tracing::info!(endpoint = %client.endpoint, "booking client ready");
        Ok(Arc::new(client))
    }
}

pub struct SupabaseClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(project_url: &str, anon_key: &str, table: &str) -> Result<Self, BookingError> {
        let endpoint = table_endpoint(project_url, table)?;

        if anon_key.trim().is_empty() {
            return Err(BookingError::ConnectionUnavailable(
                "anon key is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|e| BookingError::ConnectionUnavailable(format!("invalid anon key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|e| BookingError::ConnectionUnavailable(format!("invalid anon key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BookingError::ConnectionUnavailable(format!("http client: {e}")))?;

        Ok(Self { endpoint, client })
    }
}

fn table_endpoint(project_url: &str, table: &str) -> Result<Url, BookingError> {
    let base = Url::parse(project_url).map_err(|e| {
        BookingError::ConnectionUnavailable(format!("invalid project url {project_url:?}: {e}"))
    })?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(BookingError::ConnectionUnavailable(format!(
            "unsupported scheme in project url: {}",
            base.scheme()
        )));
    }
    if table.is_empty() {
        return Err(BookingError::ConnectionUnavailable(
            "table name is empty".to_string(),
        ));
    }

    let path = format!("{}/rest/v1/{table}", base.path().trim_end_matches('/'));
    let mut endpoint = base;
    endpoint.set_path(&path);
    Ok(endpoint)
}

/// PostgREST error body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn rejected(status: reqwest::StatusCode, body: &str) -> BookingError {
    let parsed: RemoteErrorBody = serde_json::from_str(body).unwrap_or_default();

    if parsed.details.is_some() || parsed.hint.is_some() {
        tracing::debug!(details = ?parsed.details, hint = ?parsed.hint, "remote error detail");
    }

    BookingError::RemoteRejected {
        code: parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
        message: parsed.message.unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        }),
    }
}

#[async_trait]
impl AppointmentStore for SupabaseClient {
    async fn insert(&self, booking: &BookingRequest) -> Result<Vec<serde_json::Value>, BookingError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=representation")
            .json(&[booking])
            .send()
            .await
            .map_err(|e| BookingError::Unexpected(format!("failed to call booking table: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BookingError::Unexpected(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&body)
            .map_err(|e| BookingError::Unexpected(format!("failed to parse inserted rows: {e}")))
    }
}
