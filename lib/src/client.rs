use crate::api::{AuthApi, BookmarksApi, CategoriesApi, TopicsApi};
use crate::config::Config;
use crate::error::{LinkNovaError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Unreserved characters stay literal in the `user-id` header
const USER_ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Blocking client for the LinkNova REST API
///
/// All entity wrappers ([`TopicsApi`], [`CategoriesApi`], [`BookmarksApi`],
/// [`AuthApi`]) borrow this client and go through [`ApiClient::request`], which
/// owns header handling, the `{success, data, error}` envelope and the mapping
/// of failures onto [`LinkNovaError::Api`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_prefix: Vec<String>,
    user_id: Option<HeaderValue>,
    secrets: Option<HeaderValue>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            LinkNovaError::Config(format!("Invalid base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LinkNovaError::Config(format!(
                "base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| LinkNovaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_prefix: split_path(&config.api_prefix),
            user_id: config
                .user_id
                .as_deref()
                .filter(|u| !u.is_empty())
                .map(user_id_header)
                .transpose()?,
            secrets: config
                .secrets
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| {
                    HeaderValue::from_str(s).map_err(|_| {
                        LinkNovaError::Config("secrets must be printable ASCII".to_string())
                    })
                })
                .transpose()?,
        })
    }

    pub fn topics(&self) -> TopicsApi<'_> {
        TopicsApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn bookmarks(&self) -> BookmarksApi<'_> {
        BookmarksApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// URL of an endpoint under the API prefix; segments are percent-encoded
    pub fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(self.api_prefix.iter());
            path.extend(segments);
        }
        url
    }

    /// URL of a path on the server outside the API prefix
    pub fn server_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    pub fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.request::<T, ()>(Method::GET, url, None)
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<T> {
        self.request(Method::POST, url, Some(body))
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<T> {
        self.request(Method::PUT, url, Some(body))
    }

    pub fn delete<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: Option<&B>,
    ) -> Result<T> {
        self.request(Method::DELETE, url, body)
    }

    /// Send a request and decode the payload
    ///
    /// GET requests never carry a body, even when one is passed.
    pub fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T> {
        let mut builder = self.builder(method.clone(), url.clone());
        if method != Method::GET {
            if let Some(body) = body {
                builder = builder.json(body);
            }
        }

        log::debug!("{} {}", method, url);
        let resp = builder.send()?;
        let status = resp.status();
        log::debug!("{} {} -> {}", method, url, status);

        if !status.is_success() {
            return Err(error_from_response(resp));
        }

        let payload = unwrap_envelope(status, read_json(resp)?)?;
        Ok(serde_json::from_value(payload)?)
    }

    /// GET returning the raw body text of a 2xx response
    pub(crate) fn get_text(&self, url: Url) -> Result<String> {
        log::debug!("GET {}", url);
        let resp = self.builder(Method::GET, url).send()?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp));
        }
        Ok(resp.text()?)
    }

    /// Raw send used by calls that accept more than 2xx (e.g. login redirects)
    pub(crate) fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Response> {
        log::debug!("{} {}", method, url);
        let resp = self.builder(method, url).json(body).send()?;
        log::debug!("-> {}", resp.status());
        Ok(resp)
    }

    fn builder(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(user) = &self.user_id {
            builder = builder.header("user-id", user.clone());
        }
        if let Some(secrets) = &self.secrets {
            builder = builder.header("secrets", secrets.clone());
        }
        builder
    }
}

/// The server percent-decodes `user-id`, so non-ASCII and `%` must be escaped
fn user_id_header(user: &str) -> Result<HeaderValue> {
    let encoded = utf8_percent_encode(user, USER_ID_ENCODE_SET).to_string();
    HeaderValue::from_str(&encoded)
        .map_err(|e| LinkNovaError::Config(format!("Invalid user_id '{}': {}", user, e)))
}

fn split_path(prefix: &str) -> Vec<String> {
    prefix
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Empty bodies decode as `null` so unit-returning calls work with 204s
fn read_json(resp: Response) -> Result<Value> {
    let text = resp.text()?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// `{success: true, data}` yields `data`, `{success: false, error}` fails,
/// anything else is returned unchanged
fn unwrap_envelope(status: StatusCode, body: Value) -> Result<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("success") => {
            let ok = map.get("success").and_then(Value::as_bool).unwrap_or(false);
            if ok {
                Ok(map.remove("data").unwrap_or(Value::Null))
            } else {
                let message = map
                    .get("error")
                    .and_then(message_text)
                    .unwrap_or_else(|| "API request failed".to_string());
                Err(LinkNovaError::api(status.as_u16(), message))
            }
        }
        other => Ok(other),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null => None,
        Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

pub(crate) fn error_from_response(resp: Response) -> LinkNovaError {
    let status = resp.status();
    let fallback = format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    let message = resp
        .text()
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|body| {
            body.get("error")
                .and_then(message_text)
                .or_else(|| body.get("message").and_then(message_text))
        })
        .unwrap_or(fallback);
    LinkNovaError::api(status.as_u16(), message)
}
