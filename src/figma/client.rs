//! Figma REST API Client
//!
//! Authenticated `GET` requests against the Figma API with secure token
//! handling, request/connect timeouts and exponential backoff for retryable
//! failures (rate limits, network errors, 5xx responses).

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};

use super::DocumentSource;
use crate::config::{FigmaConfig, TokenKind};
use crate::constants::{analysis, network};
use crate::types::{
    ApiError, DesignFile, ErrorCategory, ErrorClassifier, FigmaUser, FigsonaError, FileKey, Result,
};

/// Figma API client with secure token handling
pub struct FigmaClient {
    /// Token stored securely - never exposed in logs or debug output
    token: SecretString,
    token_kind: TokenKind,
    api_base: String,
    max_retries: usize,
    timeout: Duration,
    max_depth: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for FigmaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaClient")
            .field("token", &"[REDACTED]")
            .field("token_kind", &self.token_kind)
            .field("api_base", &self.api_base)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl FigmaClient {
    pub fn new(config: &FigmaConfig) -> Result<Self> {
        let token = config.resolve_token().ok_or_else(|| {
            ApiError::new(
                ErrorCategory::Auth,
                format!(
                    "No Figma access token. Set figma.token in config or {}",
                    network::TOKEN_ENV_FALLBACK
                ),
            )
        })?;

        let api_base = Self::validate_api_base(&config.api_base)?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("figsona/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FigsonaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token: SecretString::from(token),
            token_kind: config.token_kind,
            api_base,
            max_retries: config.max_retries,
            timeout,
            max_depth: analysis::DEFAULT_MAX_DEPTH,
            client,
        })
    }

    /// Only http/https; trailing slash removed
    fn validate_api_base(api_base: &str) -> Result<String> {
        let url = url::Url::parse(api_base).map_err(|e| {
            FigsonaError::Config(format!("Invalid figma.api_base '{}': {}", api_base, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FigsonaError::Config(format!(
                "figma.api_base must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Depth guard applied while decoding file responses
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// `GET /files/:key`
    pub async fn get_file(&self, key: &FileKey) -> Result<DesignFile> {
        let body = self.get_body(&format!("files/{}", key)).await?;
        DesignFile::from_json_str_with_limit(&body, self.max_depth)
    }

    /// `GET /me`
    pub async fn me(&self) -> Result<FigmaUser> {
        let body = self.get_body("me").await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_body(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.api_base, path);

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(network::RETRY_MIN_DELAY_MS))
            .with_max_delay(Duration::from_secs(network::RETRY_MAX_DELAY_SECS))
            .with_max_times(self.max_retries)
            .with_jitter();

        (|| self.get_once(&url))
            .retry(backoff)
            .when(FigsonaError::is_retryable)
            // Rate limits ask for a longer pause than the backoff curve
            .adjust(|err, wait| wait.map(|w| w.max(err.recommended_delay())))
            .notify(|err, wait| {
                warn!(
                    wait_ms = wait.as_millis() as u64,
                    "Figma request failed, retrying: {}", err
                );
            })
            .await
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let request = self.client.get(url);
        let request = match self.token_kind {
            TokenKind::Personal => request.header("X-Figma-Token", self.token.expose_secret()),
            TokenKind::Oauth => request.header(
                "Authorization",
                format!("Bearer {}", self.token.expose_secret()),
            ),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FigsonaError::timeout(format!("GET {}", url), self.timeout)
            } else {
                e.into()
            }
        })?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorClassifier::provider_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });
            return Err(ErrorClassifier::classify_http_status(status.as_u16(), &message).into());
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received Figma response");
        Ok(body)
    }
}

#[async_trait]
impl DocumentSource for FigmaClient {
    async fn fetch(&self, key: &FileKey) -> Result<DesignFile> {
        self.get_file(key).await
    }

    fn name(&self) -> &str {
        "figma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and return the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn config(api_base: &str, kind: TokenKind) -> FigmaConfig {
        FigmaConfig {
            api_base: api_base.to_string(),
            token: Some("figd_test".to_string()),
            token_kind: kind,
            max_retries: 0,
            ..FigmaConfig::default()
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = FigmaClient::new(&config("https://api.figma.com/v1/", TokenKind::Personal))
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("figd_test"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(client.api_base, "https://api.figma.com/v1");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let err = FigmaClient::new(&config("file:///tmp", TokenKind::Personal)).unwrap_err();
        assert!(matches!(err, FigsonaError::Config(_)));
    }

    #[tokio::test]
    async fn test_get_file_personal_token() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"name":"Kit","version":"7","document":{"type":"DOCUMENT","children":[{"type":"CANVAS"}]}}"#,
        )
        .await;
        let client = FigmaClient::new(&config(&base, TokenKind::Personal)).unwrap();

        let file = client.get_file(&FileKey::new("abc")).await.unwrap();
        assert_eq!(file.name.as_deref(), Some("Kit"));
        assert_eq!(file.document.unwrap().children.len(), 1);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /files/abc "));
        assert!(request.contains("x-figma-token: figd_test"));
    }

    #[tokio::test]
    async fn test_me_oauth_token() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"id":"42","email":"a@b.c","handle":"ada","img_url":null}"#,
        )
        .await;
        let client = FigmaClient::new(&config(&base, TokenKind::Oauth)).unwrap();

        let user = client.me().await.unwrap();
        assert_eq!(user.handle.as_deref(), Some("ada"));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.contains("authorization: bearer figd_test"));
    }

    #[tokio::test]
    async fn test_status_errors_are_classified() {
        let (base, _server) =
            serve_once("404 Not Found", r#"{"status":404,"err":"Not found"}"#).await;
        let client = FigmaClient::new(&config(&base, TokenKind::Personal)).unwrap();

        let err = client.get_file(&FileKey::new("missing")).await.unwrap_err();
        match err {
            FigsonaError::Api(api) => {
                assert_eq!(api.category, ErrorCategory::NotFound);
                assert_eq!(api.status, Some(404));
                assert_eq!(api.message, "Not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_access_denied_is_distinct() {
        let (base, _server) = serve_once("403 Forbidden", "").await;
        let client = FigmaClient::new(&config(&base, TokenKind::Personal)).unwrap();

        let err = client.get_file(&FileKey::new("locked")).await.unwrap_err();
        assert_eq!(err.category(), Some(ErrorCategory::AccessDenied));
    }

    #[tokio::test]
    async fn test_file_deeper_than_guard_is_too_deep() {
        let (base, _server) = serve_once(
            "200 OK",
            r#"{"document":{"type":"DOCUMENT","children":[{"type":"CANVAS","children":[{"type":"FRAME"}]}]}}"#,
        )
        .await;
        let client = FigmaClient::new(&config(&base, TokenKind::Personal))
            .unwrap()
            .with_max_depth(1);

        let err = client.get_file(&FileKey::new("deep")).await.unwrap_err();
        assert!(matches!(
            err,
            FigsonaError::Analysis(crate::types::AnalysisError::TooDeep { depth: 2, limit: 1 })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_json_error() {
        let (base, _server) = serve_once("200 OK", "<html></html>").await;
        let client = FigmaClient::new(&config(&base, TokenKind::Personal)).unwrap();

        let err = client.get_file(&FileKey::new("abc")).await.unwrap_err();
        assert!(matches!(err, FigsonaError::Json(_)));
    }
}
