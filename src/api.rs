// API client module: a small blocking HTTP client for the Gradient
// dashboard API. It is synchronous on purpose; the only background work in
// the CLI is the auto-ping thread, which calls `system_status` from its own
// worker thread.

use crate::config::Config;
use crate::models::{
    Announcement, Banner, Envelope, LatencyRecord, NodeDetail, Profile, SentryNode, SystemStatus,
};
use crate::ping::LivenessProbe;
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Errors returned by [`ApiClient`]. The HTTP status codes the dashboard
/// uses for auth and throttling get their own variants so the UI can give
/// a specific hint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GRADIENT_TOKEN is not set")]
    MissingToken,
    #[error("token contains characters that cannot be sent in a header")]
    InvalidToken,
    #[error("token is invalid or has expired")]
    Unauthorized,
    #[error("access denied, check the token or its permissions")]
    Forbidden,
    #[error("rate limit exceeded, wait a moment")]
    RateLimited,
    #[error("server error ({0}), try again later")]
    Server(StatusCode),
    #[error("request timed out, the connection is slow")]
    Timeout,
    #[error("unexpected response: {0} - {1}")]
    Status(StatusCode, String),
    #[error("request rejected with code {code}: {message}")]
    Rejected { code: i64, message: String },
    #[error("could not parse response: {0}")]
    Decode(String),
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Map a non-success status into the matching error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            s if s.is_server_error() => ApiError::Server(s),
            s => ApiError::Status(s, body),
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    /// True when the failure means a new token is needed.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::MissingToken)
    }
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating any code other than 200 as a rejection.
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.code != 200 {
            return Err(ApiError::Rejected {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        self.data.ok_or(ApiError::Rejected {
            code: self.code,
            message: "response has no data".into(),
        })
    }

    /// Lists are optional extras on some screens: a rejected or empty list
    /// renders as "nothing to show" instead of an error.
    pub fn into_list<U>(self) -> Vec<U>
    where
        T: IntoIterator<Item = U>,
    {
        let code = self.code;
        match self.data {
            Some(items) if code == 200 => items.into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Blocking client for the dashboard API. Clones share the bearer token,
/// so a token set from the menu is also used by the auto-ping probe.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Store a bearer token for subsequent requests.
    pub fn set_token(&self, token: &str) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.trim().to_string());
    }

    /// Returns whether a token is present in the client.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self.token().ok_or(ApiError::MissingToken)?;
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        Ok(headers)
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .map_err(ApiError::from_transport)?;
        let status = res.status();
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            return Err(ApiError::from_status(status, txt));
        }
        res.json::<T>().map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn user_profile(&self) -> Result<Profile, ApiError> {
        self.get::<Envelope<Profile>>("/user/profile", &[])?.into_data()
    }

    pub fn sentry_nodes(&self) -> Result<Vec<SentryNode>, ApiError> {
        let env: Envelope<Vec<SentryNode>> = self.get("/sentrynode", &[])?;
        // An empty listing comes back without `data`.
        if env.code == 200 && env.data.is_none() {
            return Ok(Vec::new());
        }
        env.into_data()
    }

    pub fn node_detail(&self, node_id: &str) -> Result<NodeDetail, ApiError> {
        self.get::<Envelope<NodeDetail>>(&format!("/sentrynode/get/{}", node_id), &[])?
            .into_data()
    }

    /// Up to 100 most recent latency samples for a node.
    pub fn latency(&self, node_id: &str) -> Result<Vec<LatencyRecord>, ApiError> {
        let env: Envelope<Vec<LatencyRecord>> =
            self.get("/sentrynode/latency", &[("limit", "100"), ("nodeId", node_id)])?;
        if env.code == 200 && env.data.is_none() {
            return Ok(Vec::new());
        }
        env.into_data()
    }

    pub fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        Ok(self.get::<Envelope<Vec<Banner>>>("/market/banners", &[])?.into_list())
    }

    pub fn announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        Ok(self
            .get::<Envelope<Vec<Announcement>>>("/market/announcements", &[])?
            .into_list())
    }

    pub fn system_status(&self) -> Result<SystemStatus, ApiError> {
        self.get("/status", &[])
    }
}

/// The keep-alive probe is a `GET /status`.
impl LivenessProbe for ApiClient {
    fn probe(&self) -> anyhow::Result<()> {
        self.system_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(token: Option<&str>) -> Config {
        Config {
            api_base_url: "http://127.0.0.1:9/api/".into(),
            token: token.map(str::to_string),
            request_timeout: Duration::from_millis(200),
            log_dir: ".".into(),
            debug: false,
        }
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            ApiError::Forbidden
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            ApiError::Server(StatusCode::BAD_GATEWAY)
        ));
        match ApiError::from_status(StatusCode::NOT_FOUND, "nope".into()) {
            ApiError::Status(code, body) => {
                assert_eq!(code, StatusCode::NOT_FOUND);
                assert_eq!(body, "nope");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn envelope_code_is_checked() {
        let ok: Envelope<i32> = Envelope { code: 200, data: Some(7), message: None };
        assert_eq!(ok.into_data().unwrap(), 7);

        let rejected: Envelope<i32> =
            Envelope { code: 500, data: Some(7), message: Some("busy".into()) };
        assert!(matches!(rejected.into_data(), Err(ApiError::Rejected { code: 500, .. })));

        let lenient: Envelope<Vec<i32>> = Envelope { code: 404, data: Some(vec![1]), message: None };
        assert!(lenient.into_list().is_empty());
    }

    #[test]
    fn requests_without_token_fail_before_sending() {
        let api = ApiClient::from_config(&config(None)).unwrap();
        assert!(!api.has_token());
        assert!(matches!(api.system_status(), Err(ApiError::MissingToken)));
        assert!(api.probe().is_err());
    }

    #[test]
    fn token_is_shared_between_clones() {
        let api = ApiClient::from_config(&config(None)).unwrap();
        let probe_side = api.clone();
        api.set_token("  abc.def.ghi \n");
        assert_eq!(probe_side.token().as_deref(), Some("abc.def.ghi"));
        assert_eq!(api.base_url(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn unusable_token_is_rejected() {
        let api = ApiClient::from_config(&config(Some("bad\ntoken"))).unwrap();
        assert!(matches!(api.headers(), Err(ApiError::InvalidToken)));
    }
}
