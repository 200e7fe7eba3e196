//! Generic request builder and response parser.
//!
//! # Design
//! `ApiClient` owns a `ClientConfig` and a `Transport` and carries no mutable
//! state between calls. Request construction (`new_request`) and response
//! interpretation (`parse_json` / `parse_empty`) are separate public steps, so
//! a host that wants to do its own IO can skip `send` entirely. Resource
//! services such as `RepositoriesService` only ever call these methods.

use std::env;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Response};
use crate::repos::RepositoriesService;
use crate::transport::{Transport, UreqTransport};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Connection settings for `ApiClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: format!("tag-protection/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Build a config from environment variables, falling back to defaults.
    ///
    /// * `TAG_PROTECTION_API_URL` - API root
    /// * `TAG_PROTECTION_TOKEN` - bearer token
    /// * `TAG_PROTECTION_TIMEOUT_SECS` - request timeout in whole seconds
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Ok(url) = env::var("TAG_PROTECTION_API_URL") {
            config.base_url = url;
        }
        config.token = env::var("TAG_PROTECTION_TOKEN").ok().filter(|t| !t.is_empty());
        if let Ok(secs) = env::var("TAG_PROTECTION_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                ApiError::Configuration(format!("invalid TAG_PROTECTION_TIMEOUT_SECS: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Synchronous client for a GitHub-style REST API.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    config: ClientConfig,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client backed by a `ureq` agent configured from `config`.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::new(config, transport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Repository-scoped endpoints.
    pub fn repositories(&self) -> RepositoriesService<'_, T> {
        RepositoriesService::new(self)
    }

    /// Build a request for `path`, relative to the base URL.
    ///
    /// `body` is JSON-encoded when present. Nothing is sent.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(format!(
                "base URL must be http(s): {:?}",
                self.config.base_url
            )));
        }

        let mut headers = vec![
            ("accept".to_string(), MEDIA_TYPE.to_string()),
            ("user-agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(token) = &self.config.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let body = match body {
            Some(body) => {
                let encoded = serde_json::to_string(body).map_err(ApiError::Serialization)?;
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(encoded)
            }
            None => None,
        };

        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(method = %method, url = %url, "built request");

        Ok(HttpRequest {
            method,
            path: url,
            headers,
            body,
        })
    }

    /// Execute `request` and decode a JSON body into `D`.
    pub fn send<D: DeserializeOwned>(&self, request: HttpRequest) -> Result<(D, Response), ApiError> {
        let response = self.execute(&request)?;
        self.parse_json(response)
    }

    /// Execute `request` and discard the body.
    pub fn send_empty(&self, request: HttpRequest) -> Result<Response, ApiError> {
        let response = self.execute(&request)?;
        self.parse_empty(response)
    }

    pub fn parse_json<D: DeserializeOwned>(&self, response: HttpResponse) -> Result<(D, Response), ApiError> {
        let meta = check_status(response.meta(), &response.body)?;
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok((value, meta)),
            Err(source) => Err(ApiError::Deserialization {
                response: meta,
                source,
            }),
        }
    }

    pub fn parse_empty(&self, response: HttpResponse) -> Result<Response, ApiError> {
        check_status(response.meta(), &response.body)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.transport.execute(request)?;
        tracing::debug!(
            method = %request.method,
            url = %request.path,
            status = response.status,
            "request completed"
        );
        Ok(response)
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(meta: Response, body: &str) -> Result<Response, ApiError> {
    if meta.is_success() {
        return Ok(meta);
    }
    tracing::warn!(status = meta.status, "unsuccessful response");
    if meta.status == 404 {
        return Err(ApiError::NotFound { response: meta });
    }
    Err(ApiError::HttpError {
        response: meta,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Replays one canned response and remembers what it was asked to send.
    struct Canned {
        response: HttpResponse,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status,
                    headers: vec![("X-Request-Id".to_string(), "abc".to_string())],
                    body: body.to_string(),
                },
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn client(canned: Canned) -> ApiClient<Canned> {
        ApiClient::new(ClientConfig::new("http://localhost:3000"), canned)
    }

    #[test]
    fn new_request_joins_path_with_single_slash() {
        let c = ApiClient::new(ClientConfig::new("http://localhost:3000/"), Canned::new(200, ""));
        let req = c.new_request::<()>(HttpMethod::Get, "/repos/o/r", None).unwrap();
        assert_eq!(req.path, "http://localhost:3000/repos/o/r");
        let req = c.new_request::<()>(HttpMethod::Get, "repos/o/r", None).unwrap();
        assert_eq!(req.path, "http://localhost:3000/repos/o/r");
    }

    #[test]
    fn new_request_sets_default_headers() {
        let req = client(Canned::new(200, ""))
            .new_request::<()>(HttpMethod::Get, "x", None)
            .unwrap();
        assert_eq!(req.header("accept"), Some(MEDIA_TYPE));
        assert!(req.header("user-agent").unwrap().starts_with("tag-protection/"));
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn new_request_with_token_and_body() {
        let config = ClientConfig {
            token: Some("s3cret".to_string()),
            ..ClientConfig::new("https://api.example.com")
        };
        let c = ApiClient::new(config, Canned::new(200, ""));
        let req = c
            .new_request(HttpMethod::Post, "x", Some(&serde_json::json!({ "a": 1 })))
            .unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer s3cret"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn invalid_base_url_fails_without_sending() {
        let c = ApiClient::new(ClientConfig::new("localhost:3000"), Canned::new(200, "[]"));
        let err = c.new_request::<()>(HttpMethod::Get, "x", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(c.transport().seen.borrow().is_empty());
    }

    #[test]
    fn send_decodes_and_returns_metadata() {
        let c = client(Canned::new(200, "[1,2,3]"));
        let req = c.new_request::<()>(HttpMethod::Get, "nums", None).unwrap();
        let (nums, meta): (Vec<u32>, _) = c.send(req).unwrap();
        assert_eq!(nums, vec![1, 2, 3]);
        assert_eq!(meta.status, 200);
        assert_eq!(meta.header("x-request-id"), Some("abc"));
        assert_eq!(c.transport().seen.borrow().len(), 1);
    }

    #[test]
    fn parse_json_not_found_carries_metadata() {
        let c = client(Canned::new(200, ""));
        let err = c
            .parse_json::<Vec<u32>>(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: r#"{"message":"Not Found"}"#.to_string(),
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.response().unwrap().status, 404);
    }

    #[test]
    fn parse_json_other_status_keeps_body() {
        let c = client(Canned::new(200, ""));
        let err = c
            .parse_json::<Vec<u32>>(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: "internal error".to_string(),
            })
            .unwrap_err();
        match err {
            ApiError::HttpError { response, body } => {
                assert_eq!(response.status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_json_bad_body() {
        let c = client(Canned::new(200, ""));
        let err = c
            .parse_json::<Vec<u32>>(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "not json".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization { .. }));
        assert_eq!(err.response().unwrap().status, 200);
    }

    #[test]
    fn send_empty_ignores_body() {
        let c = client(Canned::new(204, ""));
        let req = c.new_request::<()>(HttpMethod::Delete, "x/1", None).unwrap();
        let meta = c.send_empty(req).unwrap();
        assert_eq!(meta.status, 204);
    }

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.token.is_none());
    }
}
