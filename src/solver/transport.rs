use crate::{
    config::SolverConfig,
    error::{Result, SolveError},
    models::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse},
};
use async_trait::async_trait;
use reqwest::Client;

/// One outbound completion call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &SolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SolveError::request_failed(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            url: config.completions_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        log::debug!("POST {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Completion request failed: {}", e);
                if e.is_timeout() {
                    SolveError::request_failed(format!("Request timed out: {}", e))
                } else {
                    SolveError::from(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            log::error!("Completion API returned {}: {}", status, detail);
            return Err(SolveError::request_failed(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            SolveError::request_failed(format!("Malformed completion response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, MessageContent};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Reads one full HTTP request (headers plus Content-Length body).
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + body_len {
                return;
            }
        }
    }

    /// Serves a single canned reply and returns the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/v1", addr)
    }

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user(MessageContent::Text("2 + 2".into()))],
            max_tokens: 1000,
        }
    }

    fn transport(base_url: &str, timeout_secs: u64) -> HttpTransport {
        let config = SolverConfig::new()
            .with_base_url(base_url)
            .with_timeout_secs(timeout_secs);
        HttpTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_success_with_partial_usage() {
        let url = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"x = 5"}}],"usage":{"prompt_tokens":3}}"#,
        )
        .await;

        let response = transport(&url, 5).complete("sk-test", &request()).await.unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("x = 5"));
    }

    #[tokio::test]
    async fn test_error_envelope_message_is_extracted() {
        let url = serve_once(
            "500 Internal Server Error",
            r#"{"error":{"message":"upstream exploded","type":"server_error"}}"#,
        )
        .await;

        let err = transport(&url, 5)
            .complete("sk-test", &request())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "HTTP 500 Internal Server Error: upstream exploded");
    }

    #[tokio::test]
    async fn test_plain_error_body_is_kept() {
        let url = serve_once("500 Internal Server Error", "boom").await;

        let err = transport(&url, 5)
            .complete("sk-test", &request())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "HTTP 500 Internal Server Error: boom");
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_malformed() {
        let url = serve_once("200 OK", "not json at all").await;

        let err = transport(&url, 5)
            .complete("sk-test", &request())
            .await
            .unwrap_err();
        assert!(err
            .message()
            .starts_with("Malformed completion response:"));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let err = transport(&format!("http://{}/v1", addr), 1)
            .complete("sk-test", &request())
            .await
            .unwrap_err();
        assert!(err.message().starts_with("Request timed out"));
    }
}
