//! Gateway console API client.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tollgate_core::{PricingCatalog, SessionUser};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::api::ConsoleApi;
use crate::error::FetchError;
use crate::retry::RetryStrategy;
use crate::wire::{ApiEnvelope, OptionEntry, StatusInfo, TokenPage};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the user id next to the bearer token.
pub const USER_ID_HEADER: &str = "New-Api-User";

/// Credentials for authenticated endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access token.
    pub access_token: String,
    /// User id the token belongs to.
    pub user_id: Option<i64>,
}

/// HTTP client for the gateway console API.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    inner: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    retry_strategy: RetryStrategy,
}

impl ConsoleClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        // keep any path prefix: endpoints are joined relative to it
        let mut base = base_url.trim().trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tollgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner,
            base_url,
            credentials: None,
            retry_strategy: RetryStrategy::default(),
        })
    }

    /// Attaches credentials.
    pub fn with_credentials(
        mut self,
        access_token: impl Into<String>,
        user_id: Option<i64>,
    ) -> Self {
        self.credentials = Some(Credentials {
            access_token: access_token.into(),
            user_id,
        });
        self
    }

    /// Sets the retry strategy for this client.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns true if credentials are attached.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn require_credentials(&self) -> Result<(), FetchError> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(FetchError::AuthenticationFailed(
                "no access token configured".to_string(),
            ))
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Sends a request, retrying transient failures.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, FetchError> {
        let url = self.endpoint(path)?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(%method, url = %url, attempt, "Sending request");

            let mut request = self.inner.request(method.clone(), url.clone());
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(credentials) = &self.credentials {
                request = request.bearer_auth(&credentials.access_token);
                if let Some(user_id) = credentials.user_id {
                    request = request.header(USER_ID_HEADER, user_id.to_string());
                }
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    if self.retry_strategy.can_retry(attempt)
                        && self.retry_strategy.should_retry(&e)
                    {
                        let delay = self.retry_strategy.delay_for_attempt(attempt);
                        warn!(error = %e, ?delay, "Request failed, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            };

            let status = response.status();
            debug!(%status, "Response received");
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(FetchError::AuthenticationFailed(format!(
                    "gateway returned {status}"
                )));
            }

            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());

            if self.retry_strategy.should_retry_status(status)
                && self.retry_strategy.can_retry(attempt)
            {
                let delay = retry_after
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| self.retry_strategy.delay_for_attempt(attempt))
                    .min(self.retry_strategy.max_delay);
                warn!(%status, ?delay, "Retryable status, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(FetchError::RateLimited { retry_after });
            }
            return Err(FetchError::InvalidResponse(format!(
                "unexpected status {status}"
            )));
        }
    }

    /// Sends a request and parses the reply envelope.
    async fn call_envelope<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiEnvelope<T>, FetchError> {
        let response = self.send(method, path, query, body).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends a request and unwraps the envelope payload.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, FetchError> {
        self.call_envelope(method, path, query, body)
            .await?
            .into_data()
    }
}

// ============================================================================
// Endpoints
// ============================================================================

#[async_trait]
impl ConsoleApi for ConsoleClient {
    #[instrument(skip(self))]
    async fn status(&self) -> Result<StatusInfo, FetchError> {
        self.call(Method::GET, "/api/status", &[], None).await
    }

    #[instrument(skip(self))]
    async fn options(&self) -> Result<Vec<OptionEntry>, FetchError> {
        self.require_credentials()?;
        self.call(Method::GET, "/api/option/", &[], None).await
    }

    #[instrument(skip(self, value))]
    async fn update_option(&self, key: &str, value: &str) -> Result<(), FetchError> {
        self.require_credentials()?;
        let body = serde_json::to_value(OptionEntry::new(key, value))?;
        self.call_envelope::<Value>(Method::PUT, "/api/option/", &[], Some(&body))
            .await?
            .into_unit()
    }

    #[instrument(skip(self))]
    async fn pricing(&self) -> Result<PricingCatalog, FetchError> {
        // group tables sit next to `data`, so the envelope is read by hand
        let response = self.send(Method::GET, "/api/pricing", &[], None).await?;
        let value: Value = response.json().await?;
        if value.get("success").and_then(Value::as_bool) != Some(true) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(FetchError::Api { message });
        }
        let catalog: PricingCatalog = serde_json::from_value(value)?;
        debug!(models = catalog.models.len(), "Pricing loaded");
        Ok(catalog)
    }

    #[instrument(skip(self))]
    async fn user_self(&self) -> Result<SessionUser, FetchError> {
        self.require_credentials()?;
        self.call(Method::GET, "/api/user/self", &[], None).await
    }

    #[instrument(skip(self))]
    async fn notice(&self) -> Result<String, FetchError> {
        self.call_envelope(Method::GET, "/api/notice", &[], None)
            .await?
            .into_data_or_default()
    }

    #[instrument(skip(self))]
    async fn home_page_content(&self) -> Result<String, FetchError> {
        self.call(Method::GET, "/api/home_page_content", &[], None).await
    }

    #[instrument(skip(self))]
    async fn tokens(&self, page: u32, page_size: u32) -> Result<TokenPage, FetchError> {
        self.require_credentials()?;
        let query = [("p", page.max(1).to_string()), ("size", page_size.to_string())];
        self.call(Method::GET, "/api/token/", &query, None).await
    }
}
