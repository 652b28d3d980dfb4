//! Octocrab-backed [`HostingApi`].

use super::{ApiError, ApiResponse, HostingApi, GITHUB_ACCEPT};
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Hosting API client that sends raw requests through octocrab.
///
/// Routes are always relative, so octocrab resolves them against its base URI
/// and attaches the bearer token to every request. Retries are disabled:
/// each request is sent exactly once.
#[derive(Debug, Clone)]
pub struct OctocrabApi {
    octocrab: Octocrab,
}

impl OctocrabApi {
    /// Builds a client authenticated with a bearer token.
    ///
    /// `base_url` points the client at a GitHub Enterprise API root
    /// (e.g. `https://ghe.example.com/api/v3`); `None` targets github.com.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if octocrab rejects the configuration.
    pub fn new(token: impl Into<String>, base_url: Option<Url>) -> Result<Self, ApiError> {
        let mut builder = Octocrab::builder()
            .personal_token(token.into())
            .add_header(http::header::ACCEPT, GITHUB_ACCEPT.to_string())
            .add_retry_config(RetryConfig::None);
        if let Some(base) = base_url {
            builder = builder
                .base_uri(base.as_str().trim_end_matches('/'))
                .map_err(ApiError::Client)?;
        }
        let octocrab = builder.build().map_err(ApiError::Client)?;
        Ok(Self { octocrab })
    }

    fn transport_error(route: &str, error: octocrab::Error) -> ApiError {
        ApiError::Transport {
            route: route.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl HostingApi for OctocrabApi {
    async fn get(&self, route: &str) -> Result<ApiResponse, ApiError> {
        debug!(route, "GET");
        let response = self
            .octocrab
            ._get(route)
            .await
            .map_err(|e| Self::transport_error(route, e))?;
        let status = response.status().as_u16();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| Self::transport_error(route, e))?;
        Ok(ApiResponse { status, body })
    }

    async fn post(&self, route: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        debug!(route, "POST");
        let response = self
            .octocrab
            ._post(route, Some(body))
            .await
            .map_err(|e| Self::transport_error(route, e))?;
        let status = response.status().as_u16();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| Self::transport_error(route, e))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves every connection with `status_line` and records request heads.
    async fn serve(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let heads = Arc::new(Mutex::new(Vec::new()));
        let seen = heads.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buffer = [0u8; 4096];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buffer).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buffer[..n]),
                    }
                }
                seen.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&request).to_lowercase());
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let base = Url::parse(&format!("http://{address}/api/v3")).unwrap();
        (base, heads)
    }

    #[tokio::test]
    async fn enterprise_requests_carry_token_under_api_root() {
        let (base, heads) = serve("200 OK", "[]").await;
        let api = OctocrabApi::new("secret-token", Some(base)).unwrap();

        let response = api
            .get("/orgs/acme/repos?per_page=100&page=1")
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "[]");
        let heads = heads.lock().unwrap();
        assert_eq!(heads.len(), 1);
        let request_line = "get /api/v3/orgs/acme/repos?per_page=100&page=1 ";
        assert!(heads[0].starts_with(request_line));
        assert!(heads[0]
            .lines()
            .any(|line| line.starts_with("authorization: ") && line.ends_with("secret-token")));
        assert!(heads[0].contains("accept: application/vnd.github+json"));
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let (base, heads) = serve("502 Bad Gateway", r#"{"message":"Bad Gateway"}"#).await;
        let api = OctocrabApi::new("secret-token", Some(base)).unwrap();

        let response = api
            .post(
                "/repos/acme/te-core/git/refs",
                &json!({ "ref": "refs/heads/release-42", "sha": "abc123" }),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 502);
        assert_eq!(heads.lock().unwrap().len(), 1);
    }
}
