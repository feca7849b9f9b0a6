//! CSRF-aware HTTP client

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::cache::TokenCache;
use crate::error::{ClientError, ClientResult};

/// Header the token is attached as
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

pub const DEFAULT_TOKEN_PATH: &str = "/csrf-token";

const MUTATING_METHODS: [Method; 4] = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

/// Body of `GET /csrf-token`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    csrf_token: String,
}

/// HTTP client that attaches CSRF tokens and refreshes them on rejection
#[derive(Debug, Clone)]
pub struct CsrfClient {
    http: Client,
    base_url: Url,
    token_url: Url,
    cache: Arc<TokenCache>,
}

impl CsrfClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_cache(base_url, Arc::new(TokenCache::new()))
    }

    /// Client with its own cookie jar, sharing `cache` with other clients
    pub fn with_cache(base_url: &str, cache: Arc<TokenCache>) -> ClientResult<Self> {
        let http = Client::builder().cookie_store(true).build()?;
        Self::from_parts(http, base_url, DEFAULT_TOKEN_PATH, cache)
    }

    /// `http` must have a cookie store, otherwise the session cookie is never sent back
    pub fn from_parts(
        http: Client,
        base_url: &str,
        token_path: &str,
        cache: Arc<TokenCache>,
    ) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        let token_url = base_url
            .join(token_path)
            .map_err(|e| ClientError::InvalidUrl(format!("{token_path}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token_url,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    pub fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Fetch a fresh token and overwrite the cache with it
    pub async fn refresh_token(&self) -> ClientResult<String> {
        let response = self.http.get(self.token_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "CSRF token fetch failed");
            return Err(ClientError::TokenFetch { status });
        }

        let body: TokenResponse = response.json().await?;
        self.cache.set(body.csrf_token.clone());

        tracing::debug!("CSRF token refreshed");

        Ok(body.csrf_token)
    }

    pub async fn get(&self, path: &str) -> ClientResult<Response> {
        let request = self.http.get(self.url(path)?).build()?;
        self.execute(request).await
    }

    pub async fn post<T>(&self, path: &str, body: &T) -> ClientResult<Response>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, Some(body)).await
    }

    pub async fn put<T>(&self, path: &str, body: &T) -> ClientResult<Response>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T>(&self, path: &str, body: &T) -> ClientResult<Response>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Response> {
        self.send_json::<()>(Method::DELETE, path, None).await
    }

    /// Send `request`, attaching a token and replaying once on `403` for mutating methods
    pub async fn execute(&self, request: Request) -> ClientResult<Response> {
        if !MUTATING_METHODS.contains(request.method()) || self.is_token_request(&request) {
            return Ok(self.http.execute(request).await?);
        }

        // Cloned before the token is attached so the replay starts clean.
        let replay = request.try_clone();

        let mut request = request;
        let token = self.ensure_token().await?;
        attach_token(&mut request, &token)?;

        let response = self.http.execute(request).await?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        tracing::debug!(url = %response.url(), "Request rejected, refreshing CSRF token");

        let Some(mut replay) = replay else {
            return Err(ClientError::NotReplayable);
        };

        self.cache.clear();
        let token = self.refresh_token().await?;
        attach_token(&mut replay, &token)?;

        let response = self.http.execute(replay).await?;
        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            tracing::warn!(url = %response.url(), "Request still forbidden after CSRF refresh");
            return Err(ClientError::Rejected { status });
        }

        Ok(response)
    }

    async fn send_json<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> ClientResult<Response>
    where
        T: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, self.url(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder.build()?).await
    }

    async fn ensure_token(&self) -> ClientResult<String> {
        match self.cache.get() {
            Some(token) => Ok(token),
            None => self.refresh_token().await,
        }
    }

    fn is_token_request(&self, request: &Request) -> bool {
        let url = request.url();
        url.origin() == self.token_url.origin() && url.path() == self.token_url.path()
    }
}

fn attach_token(request: &mut Request, token: &str) -> ClientResult<()> {
    let value = HeaderValue::from_str(token).map_err(|_| ClientError::InvalidToken)?;
    request.headers_mut().insert(CSRF_HEADER, value);
    Ok(())
}
