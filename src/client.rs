use std::fmt;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    headers::{default_headers, merge_headers},
    query::build_url,
    retry::{RetryState, Step},
    ClientConfig, HttpRequest, HttpResponse, JsonFetchError, ReqwestTransport, RequestOptions,
    ResponseEnvelope, Result, Transport,
};

#[derive(Clone)]
/// JSON HTTP client bound to one base URL.
///
/// Each call is a logical request of up to `max_retries + 1` attempts.
/// Transport failures, non-2xx statuses and undecodable bodies all count
/// against the same budget and are retried without delay; the last failure
/// is returned once the budget is spent.
pub struct JsonFetchClient<T = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
}

impl<T> fmt::Debug for JsonFetchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFetchClient")
            .field("base_url", &self.config.base_url())
            .field("max_retries", &self.config.max_retries())
            .finish_non_exhaustive()
    }
}

impl JsonFetchClient<ReqwestTransport> {
    /// Creates a client backed by a default `reqwest::Client`.
    ///
    /// Fails when `max_retries` is negative or `base_url` is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jsonfetch::JsonFetchClient;
    ///
    /// let client = JsonFetchClient::new("https://example.com/api", 2)?;
    /// # Ok::<(), jsonfetch::JsonFetchError>(())
    /// ```
    pub fn new(base_url: impl Into<String>, max_retries: i64) -> Result<Self> {
        ClientConfig::new(base_url, max_retries).map(Self::from_config)
    }

    /// Creates a client from an already validated config.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }

    /// Creates a client from `JSONFETCH_BASE_URL` / `JSONFETCH_MAX_RETRIES`.
    ///
    /// See [`ClientConfig::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::from_config)
    }
}

impl<T: Transport> JsonFetchClient<T> {
    /// Creates a client issuing requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a GET request. No body is sent.
    pub async fn get<R>(
        &self,
        path: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<ResponseEnvelope<R>>
    where
        R: DeserializeOwned,
    {
        self.request::<R, ()>(Method::GET, path, None, options.into())
            .await
    }

    /// Sends a POST request with `body` encoded as JSON.
    pub async fn post<R, B>(
        &self,
        path: &str,
        body: &B,
        options: impl Into<RequestOptions>,
    ) -> Result<ResponseEnvelope<R>>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), options.into())
            .await
    }

    /// Sends a PUT request with `body` encoded as JSON.
    pub async fn put<R, B>(
        &self,
        path: &str,
        body: &B,
        options: impl Into<RequestOptions>,
    ) -> Result<ResponseEnvelope<R>>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), options.into())
            .await
    }

    /// Sends a PATCH request with `body` encoded as JSON.
    pub async fn patch<R, B>(
        &self,
        path: &str,
        body: &B,
        options: impl Into<RequestOptions>,
    ) -> Result<ResponseEnvelope<R>>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), options.into())
            .await
    }

    async fn request<R, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope<R>>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body, &options)?;
        let max_retries = self.config.max_retries();

        let mut state = RetryState::new();
        while state.can_attempt(max_retries) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "attempt {} of {} {}",
                state.attempts_made + 1,
                request.method,
                request.url
            );

            let outcome = self.attempt(request.clone()).await;
            match state.advance(outcome, max_retries) {
                Step::Attempting(next) => state = next,
                Step::Terminated(result) => return result,
            }
        }

        Err(JsonFetchError::RetryExhausted {
            attempts: state.attempts_made,
        })
    }

    /// Builds the request shared by every attempt of one logical request.
    ///
    /// Failures here are caller errors and are never retried.
    fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let url = build_url(self.config.base_url(), path, &options.query);
        let headers = merge_headers(default_headers(), &options.headers)?;
        let body = match body {
            Some(body) if method != Method::GET => Some(serde_json::to_vec(body)?),
            _ => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    async fn attempt<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ResponseEnvelope<R>> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(JsonFetchError::Transport)?;
        decode_response(response)
    }
}

/// Classifies a received response.
///
/// Non-2xx becomes [`JsonFetchError::Http`] with the body attached when it is
/// JSON. A 2xx body that is not valid JSON for `R` (an empty body included)
/// is a [`JsonFetchError::Decode`] failure.
fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<ResponseEnvelope<R>> {
    let ok = response.is_success();
    let status = response.status;

    if !ok {
        return Err(JsonFetchError::Http {
            status,
            body: serde_json::from_slice(&response.body).ok(),
        });
    }

    let data = serde_json::from_slice::<R>(&response.body).map_err(|err| {
        JsonFetchError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            String::from_utf8_lossy(&response.body)
        ))
    })?;

    Ok(ResponseEnvelope { data, status, ok })
}
