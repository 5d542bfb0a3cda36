// libs/pingdom-cell/src/services/client.rs
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

use shared_config::PingdomConfig;

use crate::error::PingdomError;
use crate::models::{Probe, Resolution, ResultsQuery};

const APP_KEY: &str = "App-Key";
const ACCOUNT_EMAIL: &str = "Account-Email";
// Multi-user authentication is only accepted with these exact values.
const MULTI_USER_AGENT: &str = "curl/7.54.0";
const MULTI_USER_ACCEPT: &str = "*/*";

struct Credentials {
    username: String,
    password: String,
    app_key: String,
    account_email: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("account_email", &self.account_email)
            .finish_non_exhaustive()
    }
}

/// Pingdom REST API 2.1 client.
/// Based on: https://www.pingdom.com/resources/api/2.1
///
/// Holds one `reqwest::Client`; clones share its connection pool.
#[derive(Debug, Clone)]
pub struct PingdomClient {
    client: Client,
    base_url: String,
    credentials: Arc<Credentials>,
}

impl PingdomClient {
    pub fn new(config: &PingdomConfig) -> Result<Self, PingdomError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PingdomError::ClientBuild)?;

        Ok(Self::with_http_client(config, client))
    }

    pub fn with_http_client(config: &PingdomConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: Arc::new(Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
                app_key: config.app_key.clone(),
                account_email: config.account_email.clone(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List overview of all checks.
    /// GET /checks
    pub async fn get_checks(&self) -> Result<Vec<Value>, PingdomError> {
        let checks: Vec<Value> = self.fetch("checks", &[], "/checks").await?;
        info!("Fetched {} checks", checks.len());
        Ok(checks)
    }

    /// List of all Pingdom probe servers.
    /// GET /probes
    pub async fn get_probes(&self) -> Result<Vec<Probe>, PingdomError> {
        let probes: Vec<Probe> = self.fetch("probes", &[], "/probes").await?;
        info!("Fetched {} probes", probes.len());
        Ok(probes)
    }

    /// Raw test results for a check.
    /// GET /results/{checkId}
    pub async fn get_results(
        &self,
        check_id: impl fmt::Display,
        query: &ResultsQuery,
    ) -> Result<Vec<Value>, PingdomError> {
        let path = format!("results/{}", check_id);
        let results: Vec<Value> = self.fetch(&path, &query.to_query(), "/results").await?;
        info!("Fetched {} results for check {}", results.len(), check_id);
        Ok(results)
    }

    /// Average response time and uptime per bucket.
    /// GET /summary.performance/{checkId}
    pub async fn get_performance_summary(
        &self,
        check_id: impl fmt::Display,
        resolution: Resolution,
    ) -> Result<Value, PingdomError> {
        let path = format!("summary.performance/{}", check_id);
        let query = [
            ("resolution", resolution.to_string()),
            ("includeuptime", "true".to_string()),
        ];
        let pointer = format!("/summary/{}", resolution.summary_key());

        self.fetch(&path, &query, &pointer).await
    }

    fn headers(&self) -> Result<HeaderMap, PingdomError> {
        let credentials = &self.credentials;
        let mut headers = HeaderMap::new();

        headers.insert(APP_KEY, header_value(APP_KEY, &credentials.app_key)?);

        if !credentials.account_email.is_empty() {
            headers.insert(USER_AGENT, HeaderValue::from_static(MULTI_USER_AGENT));
            headers.insert(
                ACCOUNT_EMAIL,
                header_value(ACCOUNT_EMAIL, &credentials.account_email)?,
            );
            headers.insert(ACCEPT, HeaderValue::from_static(MULTI_USER_ACCEPT));
        }

        Ok(headers)
    }

    /// Issues the GET and decodes the value found at `pointer` in the body.
    async fn fetch<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        pointer: &str,
    ) -> Result<T, PingdomError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let headers = self.headers()?;

        debug!("Making request to {}", url);

        let mut request = self
            .client
            .get(&url)
            .headers(headers)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            PingdomError::Network {
                url: url.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PingdomError::Network {
            url: url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            error!("Pingdom API error ({}) for {}: {}", status, url, body);
            return Err(PingdomError::http_status(url, status, body));
        }

        extract(&url, &body, pointer)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, PingdomError> {
    HeaderValue::from_str(value).map_err(|source| PingdomError::InvalidHeader { name, source })
}

fn extract<T>(url: &str, body: &str, pointer: &str) -> Result<T, PingdomError>
where
    T: DeserializeOwned,
{
    let mut document: Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse response from {}: {}", url, e);
        PingdomError::malformed(url, format!("invalid JSON: {}", e))
    })?;

    let field = document
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| {
            error!("Response from {} has no {}", url, pointer);
            PingdomError::malformed(url, format!("missing {}", pointer))
        })?;

    serde_json::from_value(field)
        .map_err(|e| PingdomError::malformed(url, format!("unexpected shape at {}: {}", pointer, e)))
}
