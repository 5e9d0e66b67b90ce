use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use opbridge_domain::constants::{API_PREFIX, DEFAULT_PAGE_SIZE};
use opbridge_domain::{ApiError, Config, Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, HOST};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ReferenceCache;
use crate::hal;
use crate::http::{HttpClient, RetryPolicy};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Long-lived OpenProject session.
///
/// Owns the connection pool, the Basic credential (encoded once at
/// creation), and the reference-data cache. One instance per process;
/// concurrent operations share it by reference and suspend independently at
/// network I/O boundaries. Dropping the session releases the pooled
/// connections.
pub struct OpenProjectClient {
    api_base: String,
    http: HttpClient,
    pub(crate) cache: ReferenceCache,
}

impl OpenProjectClient {
    /// Create a session from validated configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` when the credential or host override cannot
    /// form valid header values, or when the underlying pool cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.connection.base_url.trim_end_matches('/');
        let api_base = format!("{base_url}{API_PREFIX}");

        let credential = BASE64.encode(format!("apikey:{}", config.connection.api_key));
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {credential}"))
                .map_err(|e| Error::Config(format!("Invalid credential material: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(host) = &config.connection.host_header {
            // Virtual-host routing: the public name must survive even when
            // requests are pointed at an internal address.
            headers.insert(
                HOST,
                HeaderValue::from_str(host)
                    .map_err(|e| Error::Config(format!("Invalid host override: {e}")))?,
            );
        }
        // Keeps reverse proxies from bouncing the call back to https.
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .retry(RetryPolicy::with_max_attempts(config.retry.max_attempts))
            .default_headers(headers)
            .build()?;

        Ok(Self { api_base, http, cache: ReferenceCache::new() })
    }

    /// Execute one API call and decode the JSON body.
    ///
    /// `path` is joined onto the fixed `/api/v3` prefix. Transport failures
    /// arrive here only after the retry policy is exhausted; any status
    /// >= 400 becomes a structured [`ApiError`] carrying whatever error
    /// detail the body held.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.api_base, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            // Opportunistic decode: an unreadable error body becomes an
            // empty one, never a second failure.
            let body = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
            let error = ApiError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body,
            );
            warn!(%method, %url, status = status.as_u16(), error = %error, "API request rejected");
            return Err(error.into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Api(ApiError::bare(format!("Request failed: {e}"))))?;
        if bytes.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Api(ApiError::bare(format!("Invalid JSON response: {e}"))))
    }

    /// Fetch only the first page of a collection; the explicitly chosen
    /// non-exhaustive mode.
    pub(crate) async fn fetch_elements(
        &self,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<Vec<Value>> {
        let body = self.execute(Method::GET, path, None, query).await?;
        Ok(hal::elements(&body))
    }

    /// Walk a paginated collection, returning every element in server order.
    ///
    /// Issues pages of [`DEFAULT_PAGE_SIZE`] until a page comes back empty
    /// or the accumulated offset reaches the server-reported total. The
    /// reported total is trusted as-is.
    pub(crate) async fn collect_paginated(
        &self,
        path: &str,
        extra_query: &[(String, String)],
    ) -> Result<Vec<Value>> {
        let page_size = u64::from(DEFAULT_PAGE_SIZE);
        let mut collected = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let mut query: Vec<(String, String)> = vec![
                ("pageSize".to_owned(), page_size.to_string()),
                ("offset".to_owned(), offset.to_string()),
            ];
            query.extend_from_slice(extra_query);

            let page = self.execute(Method::GET, path, None, Some(&query)).await?;
            let elements = hal::elements(&page);
            if elements.is_empty() {
                break;
            }
            collected.extend(elements);

            let total = page.get("total").and_then(Value::as_u64).unwrap_or(0);
            if offset + page_size >= total {
                break;
            }
            offset += page_size;
        }

        debug!(path, count = collected.len(), "collected paginated elements");
        Ok(collected)
    }

    /// Probe the API root and report the advertised core version.
    pub async fn core_version(&self) -> Result<String> {
        let root = self.execute(Method::GET, "/", None, None).await?;
        Ok(root.get("coreVersion").and_then(Value::as_str).unwrap_or("unknown").to_owned())
    }

    /// Drop one cached reference collection by key.
    pub fn invalidate_cached(&self, key: &str) {
        self.cache.invalidate(key);
    }

    /// Drop every cached reference collection.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
