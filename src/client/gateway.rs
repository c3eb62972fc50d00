use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{TalkError, TalkResult};
use crate::logging::{log_debug, log_error};

/// Thin HTTP layer shared by every endpoint call.
///
/// Requests go out with the session cookie jar and a JSON content type.
/// Any status outside 2xx becomes `TalkError::RequestFailed` carrying the
/// most specific message the backend offered.
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl ApiGateway {
    pub fn new(base_url: &str, cookie: Option<&str>) -> TalkResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| TalkError::ConfigError(format!("Invalid server URL '{}': {}", base_url, e)))?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = cookie {
            // Stored as a Cookie header value: "name=value; other=value"
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self { http, base_url, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current cookies for the backend, in Cookie header form.
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    fn url(&self, path: &str) -> TalkResult<Url> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| TalkError::InvalidInput(format!("Bad request path '{}': {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TalkResult<T> {
        let url = self.url(path)?;
        self.execute("GET", path, self.http.get(url)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> TalkResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute("GET", path, self.http.get(url).query(query)).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> TalkResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute("POST", path, self.http.post(url).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> TalkResult<T> {
        let url = self.url(path)?;
        self.execute("POST", path, self.http.post(url)).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> TalkResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute("PUT", path, self.http.put(url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> TalkResult<T> {
        let url = self.url(path)?;
        self.execute("DELETE", path, self.http.delete(url)).await
    }

    /// The multipart boundary header replaces the JSON default.
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> TalkResult<T> {
        let url = self.url(path)?;
        self.execute("POST", path, self.http.post(url).multipart(form)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> TalkResult<T> {
        log_debug(&format!("{} {}", method, path));

        let response = request.send().await.map_err(|e| {
            log_error(&format!("{} {} failed: {}", method, path, e));
            TalkError::request_failed(None, e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TalkError::request_failed(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            let detail = error_detail(status.as_u16(), &body);
            log_error(&format!("{} {} -> {}: {}", method, path, status.as_u16(), detail));
            return Err(TalkError::request_failed(Some(status.as_u16()), detail));
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            TalkError::ParseError(format!("Unexpected response from {} {}: {}", method, path, e))
        })
    }
}

/// Picks the message shown for a failed request: the JSON `error` field,
/// then `message`, then the raw body, then a generic line with the status.
pub fn error_detail(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        trimmed.to_string()
    }
}
