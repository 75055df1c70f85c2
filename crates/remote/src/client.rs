use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use rentswipe_core::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RETRY_BASE_DELAY_MS};
use rentswipe_core::{ListingId, UserId, env_parse_with_default};

use crate::api_types::{AddLikeRequest, LikedListingsBody};
use crate::authority::LikeAuthority;
use crate::error::RemoteError;

const MAX_RETRIES: usize = 3;
const RETRY_MULTIPLIERS: [u32; 4] = [0, 1, 2, 4];
const MAX_ERROR_BODY_LEN: usize = 500;

/// Connection settings for [`HttpLikeAuthority`].
#[derive(Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub retry_base_delay: Duration,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }

    /// Reads `RENTSWIPE_API_URL`, `RENTSWIPE_API_TOKEN`,
    /// `RENTSWIPE_HTTP_TIMEOUT_SECS` and `RENTSWIPE_RETRY_BASE_DELAY_MS`.
    /// Returns `None` when no API URL is configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url =
            std::env::var("RENTSWIPE_API_URL").ok().filter(|url| !url.trim().is_empty())?;
        let api_token =
            std::env::var("RENTSWIPE_API_TOKEN").ok().filter(|token| !token.trim().is_empty());
        let timeout_secs =
            env_parse_with_default("RENTSWIPE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);
        let retry_ms =
            env_parse_with_default("RENTSWIPE_RETRY_BASE_DELAY_MS", DEFAULT_RETRY_BASE_DELAY_MS);
        Some(Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            retry_base_delay: Duration::from_millis(retry_ms),
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    #[must_use]
    pub const fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

/// Like authority reached over HTTP.
///
/// - `POST {base}/users/{user}/likes` with `{"listingId": ..}`
/// - `DELETE {base}/users/{user}/likes/{listing}` (404 means already absent)
/// - `GET {base}/users/{user}/likes`
pub struct HttpLikeAuthority {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: reqwest::Url,
    pub(crate) api_token: Option<String>,
    pub(crate) retry_base_delay: Duration,
}

impl std::fmt::Debug for HttpLikeAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLikeAuthority")
            .field("client", &self.client)
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

impl HttpLikeAuthority {
    /// # Errors
    /// Returns [`RemoteError::ClientInit`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base_url = reqwest::Url::parse(trimmed)
            .map_err(|e| RemoteError::ClientInit(format!("invalid base URL {trimmed:?}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteError::ClientInit(format!("base URL {trimmed:?} is not http(s)")));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_token: config.api_token,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::ClientInit("base URL cannot have path segments".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request, retrying transient failures with growing delays.
    ///
    /// # Errors
    /// Non-transient statuses are returned immediately as
    /// [`RemoteError::HttpStatus`]; persistent transient failures end in
    /// [`RemoteError::RetriesExhausted`].
    pub(crate) async fn send_with_retry<F>(
        &self,
        operation: &'static str,
        build: F,
    ) -> Result<reqwest::Response, RemoteError>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<RemoteError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let factor = RETRY_MULTIPLIERS.get(attempt).copied().unwrap_or(4);
                let delay = self.retry_base_delay.saturating_mul(factor);
                tokio::time::sleep(delay).await;
                tracing::warn!(
                    operation,
                    "like authority retry attempt {attempt}/{MAX_RETRIES} after {delay:?}"
                );
            }

            let mut request = build(&self.client);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    let err = RemoteError::HttpRequest(e);
                    if err.is_transient() {
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                },
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = RemoteError::HttpStatus {
                code,
                body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        match last_error {
            Some(err) => Err(RemoteError::RetriesExhausted(Box::new(err))),
            None => Err(RemoteError::ClientInit("retry loop made no attempt".to_owned())),
        }
    }
}

#[async_trait]
impl LikeAuthority for HttpLikeAuthority {
    async fn add_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        let url = self.endpoint(&["users", user.as_str(), "likes"])?;
        let body = AddLikeRequest { listing_id: listing.as_str() };
        self.send_with_retry("add_like", |client| client.post(url.clone()).json(&body)).await?;
        tracing::debug!(listing_id = %listing, "like recorded");
        Ok(())
    }

    async fn remove_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        let url = self.endpoint(&["users", user.as_str(), "likes", listing.as_str()])?;
        match self.send_with_retry("remove_like", |client| client.delete(url.clone())).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                tracing::debug!(listing_id = %listing, "like already absent on server");
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    async fn liked_listings(&self, user: &UserId) -> Result<Vec<ListingId>, RemoteError> {
        let url = self.endpoint(&["users", user.as_str(), "likes"])?;
        let response =
            self.send_with_retry("liked_listings", |client| client.get(url.clone())).await?;
        let body = response.text().await?;
        let parsed: LikedListingsBody =
            serde_json::from_str(&body).map_err(|e| RemoteError::JsonParse {
                context: format!("liked listings response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for entry in parsed.into_entries() {
            match ListingId::new(entry.into_raw()) {
                Ok(id) => {
                    if seen.insert(id.clone()) {
                        ids.push(id);
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping invalid listing id from like authority");
                },
            }
        }
        Ok(ids)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
