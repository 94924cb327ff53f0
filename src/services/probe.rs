use crate::services::error::{ServiceError, ServiceResult};
use tokio::time::Duration;

/// HTTP status checker backing the probe command
#[derive(Debug, Clone)]
pub struct ProbeService {
    client: reqwest::Client,
}

impl ProbeService {
    pub fn new() -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServiceError::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Issue one GET and report the status code. The body is never read.
    pub async fn check(&self, url: &str, timeout: Duration) -> ServiceResult<u16> {
        tracing::debug!("Probing {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ServiceError::from_request(url, timeout, e))?;

        let status = response.status();
        drop(response);

        tracing::info!("{} responded with {}", url, status);
        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn service() -> ProbeService {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ProbeService::with_client(client)
    }

    /// Answer a single request with a canned response
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_reports_status_code() {
        let url = serve_once(
            "HTTP/1.1 418 I'm a teapot\r\nContent-Length: 5\r\nConnection: close\r\n\r\nshort",
        )
        .await;
        let code = tokio_test::assert_ok!(service().check(&url, Duration::from_secs(5)).await);
        assert_eq!(code, 418);
    }

    #[tokio::test]
    async fn test_times_out_on_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let url = format!("http://{}/", addr);
        let err = service().check(&url, Duration::from_millis(100)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Timeout { .. }), "{err:?}");
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/", addr);
        let err = service().check(&url, Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport { .. }), "{err:?}");
    }
}
