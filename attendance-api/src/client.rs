use crate::endpoints::auth::{
    LoginErrorBody, LoginOutcome, LoginRequest, LoginResponse, Role, LOGIN_FAILED, LOGIN_PATH,
};
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::request::{build_form, RequestBody, RequestOptions};
use crate::response::{ApiResponse, JsonReply};
use attendance_auth::{Settings, Token, TokenStore};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Message fragment the backend returns (422) for tokens minted with an
/// older subject format
const STALE_TOKEN_MARKER: &str = "subject must be a string";

/// Why the client ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// 401 seen by a JSON call
    Unauthorized,
    /// 422 carrying the stale subject marker
    StaleToken,
    LoggedOut,
}

/// Sends the user back to the login entry point
pub trait SessionListener: Send + Sync {
    fn session_expired(&self, reason: ExpiryReason);
}

pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
    session_listener: Option<Arc<dyn SessionListener>>,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        Self::build(base_url.into(), token_store, None)
    }

    pub fn from_settings(
        settings: &Settings,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        Self::build(
            settings.api_base_url.clone(),
            token_store,
            settings.request_timeout(),
        )
    }

    fn build(
        base_url: String,
        token_store: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_store,
            session_listener: None,
        })
    }

    pub fn with_session_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.session_listener = Some(listener);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &dyn TokenStore {
        self.token_store.as_ref()
    }

    /// Raw call: returns the response as received, including 401s.
    ///
    /// The only side effect is on a 422 carrying the stale-token marker,
    /// which clears the stored token and notifies the session listener.
    pub async fn call(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let RequestOptions {
            method,
            body,
            headers,
        } = options;

        let token = self.token_store.get_token()?;
        let headers = build_headers(headers, token.as_ref(), body.as_ref())?;

        tracing::debug!("{} {}", method, url);
        let mut request = self.http_client.request(method, &url).headers(headers);
        request = match body {
            // A null JSON body means "no body", the content type still applies
            Some(RequestBody::Json(serde_json::Value::Null)) | None => request,
            Some(RequestBody::Json(value)) => {
                request.body(serde_json::to_vec(&value).map_err(ApiError::Encode)?)
            }
            Some(RequestBody::Multipart(parts)) => request.multipart(build_form(&parts)?),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Network error calling {}: {}", url, e);
                return Err(ApiError::Network(e));
            }
        };

        let mut response = ApiResponse::read(response).await.map_err(|e| {
            tracing::error!("Network error reading response from {}: {}", url, e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("{} returned 401, leaving it to the caller", endpoint);
            return Ok(response);
        }

        if !status.is_success() {
            let diagnostic = response.diagnostic();
            tracing::error!("API error ({}) from {}: {}", status, endpoint, diagnostic);

            if status == StatusCode::UNPROCESSABLE_ENTITY && is_stale_token(&diagnostic) {
                tracing::warn!("Server rejected the token format, ending session");
                self.end_session(ExpiryReason::StaleToken)?;
                response.mark_session_expired();
            }
        }

        Ok(response)
    }

    /// JSON call: decodes the body, ending the session on a 401.
    pub async fn call_json<T>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<JsonReply<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.call(endpoint, options).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Token rejected by {}, ending session", endpoint);
            self.end_session(ExpiryReason::Unauthorized)?;
            return Ok(JsonReply::SessionExpired);
        }

        // Already handled inside `call`
        if response.session_expired() {
            return Ok(JsonReply::SessionExpired);
        }

        match response.json::<T>() {
            Ok(data) => Ok(JsonReply::Data(data)),
            Err(e) => {
                tracing::error!("Failed to parse response from {} as JSON: {}", endpoint, e);
                Ok(JsonReply::Empty)
            }
        }
    }

    pub async fn fetch<E>(&self, endpoint: E) -> Result<JsonReply<E::Response>, ApiError>
    where
        E: Endpoint,
    {
        let options = endpoint.options()?;
        self.call_json(&endpoint.path(), options).await
    }

    /// Exchange credentials for a token, storing it when the backend issues one
    pub async fn login(
        &self,
        id: &str,
        password: &SecretString,
        role: Role,
    ) -> Result<LoginOutcome, ApiError> {
        let options = RequestOptions::new()
            .method(Method::POST)
            .json(&LoginRequest {
                id,
                password: password.expose_secret(),
                role,
            })?;

        let response = self.call(LOGIN_PATH, options).await?;

        if !response.is_success() {
            let message = response
                .json::<LoginErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            tracing::warn!("Login for {} rejected ({}): {}", id, response.status(), message);
            return Ok(LoginOutcome::Failed {
                status: response.status(),
                message,
            });
        }

        let data: LoginResponse = response.json()?;
        if let Some(token) = &data.token {
            self.token_store.set_token(&Token::new(token.as_str()))?;
            tracing::info!("Logged in as {} ({})", id, role);
        } else {
            tracing::warn!("Login for {} succeeded without a token", id);
        }

        Ok(LoginOutcome::Success(data))
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        tracing::info!("Logging out");
        self.end_session(ExpiryReason::LoggedOut)
    }

    fn end_session(&self, reason: ExpiryReason) -> Result<(), ApiError> {
        self.token_store.clear_token()?;
        if let Some(listener) = &self.session_listener {
            listener.session_expired(reason);
        }
        Ok(())
    }
}

fn is_stale_token(diagnostic: &serde_json::Value) -> bool {
    diagnostic
        .get("msg")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|msg| msg.to_lowercase().contains(STALE_TOKEN_MARKER))
}

/// Merge caller headers with the bearer token and the body's content type.
/// The stored token always wins over a caller-supplied `Authorization`.
fn build_headers(
    mut headers: HeaderMap,
    token: Option<&Token>,
    body: Option<&RequestBody>,
) -> Result<HeaderMap, ApiError> {
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| ApiError::InvalidRequest("token is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    match body {
        Some(RequestBody::Multipart(_)) => {
            headers.remove(CONTENT_TYPE);
        }
        Some(RequestBody::Json(_)) | None => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
    }

    Ok(headers)
}
