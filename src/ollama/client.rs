use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::stream::FragmentStream;
use super::types::{
    ChatRequest, ChatResponse, GenerateRequest, ModelInfo, TagsResponse, VersionResponse,
};
use crate::app::RuntimeConfig;
use crate::utils::{LauncherError, Result};

/// Outcome of a generate call that reached the server
pub enum GenerateReply {
    /// 2xx: the body, decoded lazily
    Stream(FragmentStream),
    /// Anything else: status and raw body, left unparsed
    Failed { status: u16, body: String },
}

impl std::fmt::Debug for GenerateReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateReply::Stream(_) => f.write_str("Stream(..)"),
            GenerateReply::Failed { status, body } => f
                .debug_struct("Failed")
                .field("status", status)
                .field("body", body)
                .finish(),
        }
    }
}

/// The slice of the Ollama HTTP API this tool talks to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OllamaApi: Send + Sync {
    async fn version(&self) -> Result<VersionResponse>;

    async fn tags(&self) -> Result<Vec<ModelInfo>>;

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReply>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// HTTP client for an Ollama server
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(runtime: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .connect_timeout(runtime.connect_timeout())
                .timeout(runtime.request_timeout())
                .build()?,
            base_url: runtime.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into an error carrying its body
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LauncherError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl OllamaApi for OllamaClient {
    async fn version(&self) -> Result<VersionResponse> {
        let response = self.client.get(self.url("/api/version")).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn tags(&self) -> Result<Vec<ModelInfo>> {
        let response = self.client.get(self.url("/api/tags")).send().await?;
        let response = ensure_success(response).await?;
        let tags: TagsResponse = response.json().await?;
        Ok(tags.models)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateReply> {
        debug!("generate with model {}", request.model);

        // `.json()` also sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(GenerateReply::Failed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(GenerateReply::Stream(FragmentStream::from_body(
            response.bytes_stream(),
        )))
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        debug!("chat with model {}", request.model);

        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let runtime = RuntimeConfig {
            base_url: "http://localhost:11434/".to_string(),
            ..RuntimeConfig::default()
        };
        let client = OllamaClient::new(&runtime).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let runtime = RuntimeConfig {
            // Port 9 (discard) is closed on test machines
            base_url: "http://127.0.0.1:9".to_string(),
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
            ..RuntimeConfig::default()
        };
        let client = OllamaClient::new(&runtime).unwrap();
        let err = client.version().await.unwrap_err();
        assert!(matches!(err, LauncherError::NetworkError(_)));
    }
}
