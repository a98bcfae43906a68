use crate::client::ApiClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title and description the server scraped for a URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlMetadata {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiClient {
    /// Dashboard counters; the shape is owned by the server
    pub fn stats(&self) -> Result<Map<String, Value>> {
        let stats: Option<Map<String, Value>> = self.get(self.api_url(&["stats"]))?;
        Ok(stats.unwrap_or_default())
    }

    pub fn metadata(&self, url: &str) -> Result<UrlMetadata> {
        let mut endpoint = self.api_url(&["utils", "metadata"]);
        endpoint.query_pairs_mut().append_pair("url", url);
        let mut meta: UrlMetadata = self.get(endpoint)?;
        if meta.url.is_empty() {
            meta.url = url.to_string();
        }
        Ok(meta)
    }

    /// Health check; any 2xx counts as healthy and the body is returned as-is
    pub fn health(&self) -> Result<String> {
        self.get_text(self.server_url(&["-", "ln", "health"]))
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::TestServer;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_metadata_query() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("GET"))
                .and(path("/-/ln/v1/api/utils/metadata"))
                .and(query_param("url", "https://serde.rs/?x=1&y=2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": true,
                    "data": {"title": "Serde", "description": "Serialization framework"}
                }))),
        );

        let meta = srv.client().metadata("https://serde.rs/?x=1&y=2").unwrap();
        assert_eq!(meta.url, "https://serde.rs/?x=1&y=2");
        assert_eq!(meta.title.as_deref(), Some("Serde"));
    }

    #[test]
    fn test_stats() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("GET"))
                .and(path("/-/ln/v1/api/stats"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": true,
                    "data": {"topics": 4, "categories": 12, "bookmarks": 230}
                }))),
        );

        let stats = srv.client().stats().unwrap();
        assert_eq!(stats.get("bookmarks"), Some(&json!(230)));
    }

    #[test]
    fn test_health_outside_prefix() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("GET"))
                .and(path("/-/ln/health"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok")),
        );

        assert_eq!(srv.client().health().unwrap(), "ok");
    }

    #[test]
    fn test_health_failure() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("GET"))
                .and(path("/-/ln/health"))
                .respond_with(ResponseTemplate::new(503)),
        );

        let err = srv.client().health().unwrap_err();
        assert!(err.is_server_error());
    }
}
