//! Authenticated calls to an OpenAI-compatible API

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::provider_message;

/// Base URL used when the configuration names none
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Base URL and credentials of an OpenAI-compatible API
#[derive(Clone)]
pub struct Upstream {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl Upstream {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<&Url>) -> Self {
        let base_url = base_url
            .map_or(DEFAULT_OPENAI_API_URL, Url::as_str)
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Absolute URL of `path` below the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start an authenticated `POST` to `path`
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
    }
}

/// Status and best available diagnostic of a rejected upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status: u16,
    pub message: String,
}

impl UpstreamFailure {
    /// Drain a non-success response, falling back to `fallback` when the body says nothing useful
    pub async fn read(response: Response, fallback: &str) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        tracing::error!(status, "upstream rejected request: {body}");

        Self {
            status,
            message: provider_message(&body, fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base_url: Option<&str>) -> Upstream {
        let base_url = base_url.map(|url| Url::parse(url).unwrap());
        Upstream::new(Client::new(), SecretString::from("sk-test"), base_url.as_ref())
    }

    #[test]
    fn default_base_url_is_openai() {
        assert_eq!(upstream(None).url("files"), "https://api.openai.com/v1/files");
    }

    #[test]
    fn trailing_and_leading_slashes_collapse() {
        let upstream = upstream(Some("http://localhost:8080/v1/"));
        assert_eq!(upstream.url("/audio/speech"), "http://localhost:8080/v1/audio/speech");
    }

    #[test]
    fn requests_carry_bearer_token() {
        let request = upstream(None).post("chat/completions").build().unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.headers()[http::header::AUTHORIZATION], "Bearer sk-test");
    }

    #[tokio::test]
    async fn failure_extracts_provider_message() {
        let response = http::Response::builder()
            .status(429)
            .body(r#"{"error":{"message":"Rate limit reached"}}"#)
            .unwrap();

        let failure = UpstreamFailure::read(Response::from(response), "fallback").await;

        assert_eq!(
            failure,
            UpstreamFailure {
                status: 429,
                message: "Rate limit reached".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn empty_failure_body_uses_fallback() {
        let response = http::Response::builder().status(500).body("").unwrap();

        let failure = UpstreamFailure::read(Response::from(response), "Error from OpenAI API").await;

        assert_eq!(failure.message, "Error from OpenAI API");
    }
}
