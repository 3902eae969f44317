//! REST client for the café directory backend.
//!
//! The backend is an opaque `{ success, data }` JSON service. Consumers
//! depend on the [`CafeApi`] trait so the favorites cache and pages can be
//! exercised against stub clients in native tests; [`HttpCafeApi`] is the
//! browser implementation over the fetch API. Public endpoints go out
//! without credentials, admin endpoints send the session cookie.

use crate::filter::FilterCriteria;
use crate::navigation::{build_filter_query, encode_component};
use crate::Cafe;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

pub type ApiResult<T> = Result<T, ApiError>;
pub type ApiFuture<T> = LocalBoxFuture<'static, ApiResult<T>>;

/// Failure modes surfaced to callers. `Clone` so a shared in-flight fetch
/// can hand the same outcome to every waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, bad URL).
    Network(String),
    /// The server answered with a non-success HTTP status.
    Status(u16),
    /// The response body could not be decoded into the expected shape.
    Decode(String),
    /// The decoded record is missing required fields and must not be cached.
    InvalidRecord,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(detail) => write!(f, "network error: {}", detail),
            ApiError::Status(code) => write!(f, "server responded with status {}", code),
            ApiError::Decode(detail) => write!(f, "failed to decode response: {}", detail),
            ApiError::InvalidRecord => write!(f, "received an incomplete cafe record"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Collaborator interface consumed by the state subsystem and pages.
pub trait CafeApi {
    fn fetch_cafe_by_id(&self, id: &str) -> ApiFuture<Cafe>;
    fn list_cafes(&self, criteria: &FilterCriteria) -> ApiFuture<Vec<Cafe>>;
    fn login(&self, username: &str, password: &str) -> ApiFuture<bool>;
    fn check_auth(&self) -> ApiFuture<bool>;
    fn delete_cafe(&self, id: &str) -> ApiFuture<()>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    data: T,
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Fetch-backed client. `base_url` is prepended to every path; empty means
/// same-origin.
pub struct HttpCafeApi {
    base_url: String,
}

impl HttpCafeApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn request_json(url: String, init: RequestInit) -> ApiResult<JsValue> {
    let request = Request::new_with_str_and_init(&url, &init)
        .map_err(|_| ApiError::Network(format!("invalid request for {}", url)))?;
    let response = JsFuture::from(gloo_utils::window().fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Network(format!("request to {} failed", url)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ApiError::Network("fetch returned a non-Response value".to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    let body = response
        .json()
        .map_err(|_| ApiError::Decode("response body is not JSON".to_string()))?;
    JsFuture::from(body)
        .await
        .map_err(|_| ApiError::Decode("failed to read JSON response body".to_string()))
}

fn decode<T: DeserializeOwned>(value: JsValue) -> ApiResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

fn get_init(credentials: Option<RequestCredentials>) -> RequestInit {
    let init = RequestInit::new();
    init.set_method("GET");
    if let Some(credentials) = credentials {
        init.set_credentials(credentials);
    }
    init
}

impl CafeApi for HttpCafeApi {
    fn fetch_cafe_by_id(&self, id: &str) -> ApiFuture<Cafe> {
        let url = self.url(&format!("/api/cafes/{}", encode_component(id)));
        async move {
            let value = request_json(url, get_init(None)).await?;
            let envelope: Envelope<Cafe> = decode(value)?;
            Ok(envelope.data)
        }
        .boxed_local()
    }

    fn list_cafes(&self, criteria: &FilterCriteria) -> ApiFuture<Vec<Cafe>> {
        let params = build_filter_query(criteria);
        let path = if params.is_empty() {
            "/api/cafes".to_string()
        } else {
            format!("/api/cafes?{}", params)
        };
        let url = self.url(&path);
        async move {
            let value = request_json(url, get_init(None)).await?;
            let envelope: Envelope<Vec<Cafe>> = decode(value)?;
            Ok(envelope.data)
        }
        .boxed_local()
    }

    fn login(&self, username: &str, password: &str) -> ApiFuture<bool> {
        let url = self.url("/api/admin/login");
        let body = serde_json::to_string(&LoginRequest { username, password });
        async move {
            let body =
                body.map_err(|err| ApiError::Decode(format!("failed to encode login: {}", err)))?;
            let headers = Headers::new()
                .map_err(|_| ApiError::Network("failed to build request headers".to_string()))?;
            headers
                .append("Content-Type", "application/json")
                .map_err(|_| ApiError::Network("failed to build request headers".to_string()))?;
            let init = RequestInit::new();
            init.set_method("POST");
            init.set_credentials(RequestCredentials::Include);
            init.set_headers(headers.as_ref());
            init.set_body(&JsValue::from_str(&body));

            let value = request_json(url, init).await?;
            let status: StatusResponse = decode(value)?;
            Ok(status.success)
        }
        .boxed_local()
    }

    fn check_auth(&self) -> ApiFuture<bool> {
        let url = self.url("/api/admin/check-auth");
        async move {
            let value = request_json(url, get_init(Some(RequestCredentials::Include))).await?;
            let status: StatusResponse = decode(value)?;
            Ok(status.success)
        }
        .boxed_local()
    }

    fn delete_cafe(&self, id: &str) -> ApiFuture<()> {
        let url = self.url(&format!("/api/cafes/{}", encode_component(id)));
        async move {
            let init = RequestInit::new();
            init.set_method("DELETE");
            init.set_credentials(RequestCredentials::Include);
            let value = request_json(url, init).await?;
            let status: StatusResponse = decode(value)?;
            if status.success {
                Ok(())
            } else {
                Err(ApiError::Status(500))
            }
        }
        .boxed_local()
    }
}
