//! HTTP状态检测器
//!
//! 发送 HEAD 请求，状态码恰好为 200 时判定为成功

use crate::config::MonitorConfig;
use crate::health::checker::{
    classify_request_error, format_error_chain, status_line, Checker, ProbeSettings,
};
use crate::health::result::CheckResult;
use crate::health::timeout::TimeoutResolver;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP状态检测器类型标识
pub const HTTP_STATUS: &str = "http-status";

/// HTTP状态检测器
#[derive(Debug, Clone)]
pub struct HttpStatusChecker {
    /// 超时解析器
    timeouts: TimeoutResolver,
    /// HTTP设置
    settings: ProbeSettings,
}

impl HttpStatusChecker {
    /// 创建新的HTTP状态检测器
    pub fn new(timeouts: TimeoutResolver, settings: ProbeSettings) -> Self {
        Self { timeouts, settings }
    }
}

#[async_trait]
impl Checker for HttpStatusChecker {
    fn kind(&self) -> &str {
        HTTP_STATUS
    }

    async fn check(&self, monitor: &MonitorConfig) -> CheckResult {
        let connect_timeout = self.timeouts.resolve(&monitor.timeout);

        let client = match self.settings.build_client(connect_timeout) {
            Ok(client) => client,
            Err(e) => return CheckResult::failure(format_error_chain(&e), Duration::ZERO),
        };

        let start_time = Instant::now();
        let response_result = client.head(&monitor.url).send().await;
        let elapsed = start_time.elapsed();

        // 响应在离开作用域时释放，连接随之归还
        let response = match response_result {
            Ok(response) => response,
            Err(e) => {
                debug!(
                    monitor = %monitor.name,
                    url = %monitor.url,
                    failure = classify_request_error(&e),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "HTTP状态检测请求失败"
                );
                return CheckResult::failure(format_error_chain(&e), elapsed);
            }
        };

        let status = response.status();
        debug!(
            monitor = %monitor.name,
            url = %monitor.url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "HTTP状态检测完成"
        );

        if status != StatusCode::OK {
            return CheckResult::failure(format!("Http status is {}", status_line(status)), elapsed);
        }

        CheckResult::success("Http status code is 200", elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::observer::RecordingObserver;
    use crate::health::timeout::DEFAULT_TIMEOUT;
    use serial_test::serial;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn create_checker() -> (HttpStatusChecker, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let checker = HttpStatusChecker::new(
            TimeoutResolver::new(observer.clone()),
            ProbeSettings::default(),
        );
        (checker, observer)
    }

    /// 接受连接后延迟 `delay` 才返回 200 的服务器
    async fn spawn_delayed_server(delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                        .await;
                });
            }
        });

        format!("http://{addr}/")
    }

    fn create_monitor(url: &str, timeout: &str) -> MonitorConfig {
        MonitorConfig {
            name: "status-test".to_string(),
            url: url.to_string(),
            timeout: timeout.to_string(),
            content: String::new(),
            kind: HTTP_STATUS.to_string(),
        }
    }

    #[tokio::test]
    async fn test_status_200_is_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/health")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let monitor = create_monitor(&format!("{}/health", server.url()), "5s");
        let result = checker.check(&monitor).await;

        mock.assert_async().await;
        assert!(result.is_success());
        assert_eq!(result.message(), "Http status code is 200");
        assert!(result.elapsed_nanos() >= 0);
    }

    #[tokio::test]
    async fn test_non_200_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let monitor = create_monitor(&format!("{}/missing", server.url()), "5s");
        let result = checker.check(&monitor).await;

        assert!(!result.is_success());
        assert_eq!(result.message(), "Http status is 404 Not Found");
    }

    #[tokio::test]
    async fn test_other_2xx_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/")
            .with_status(204)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "5s")).await;

        assert!(!result.is_success());
        assert!(result.message().contains("204"));
    }

    #[tokio::test]
    async fn test_unreachable_target() {
        let (checker, _) = create_checker();
        let result = checker
            .check(&create_monitor("http://127.0.0.1:1/", "2s"))
            .await;

        assert!(!result.is_success());
        assert!(!result.message().is_empty());
        assert!(result.elapsed_nanos() >= 0);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor("not a url", "2s")).await;

        assert!(!result.is_success());
        assert!(!result.message().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_timeout_still_runs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let (checker, observer) = create_checker();
        let result = checker
            .check(&create_monitor(&server.url(), "notaduration"))
            .await;

        mock.assert_async().await;
        assert!(result.is_success());
        assert_eq!(
            observer.events(),
            vec![("notaduration".to_string(), DEFAULT_TIMEOUT)]
        );
    }

    #[tokio::test]
    async fn test_slow_response_not_bounded_by_connect_timeout() {
        let url = spawn_delayed_server(Duration::from_millis(1500)).await;

        let (checker, observer) = create_checker();
        let result = checker.check(&create_monitor(&url, "1s")).await;

        assert!(result.is_success(), "unexpected failure: {}", result.message());
        assert_eq!(result.message(), "Http status code is 200");
        assert!(result.elapsed() >= Duration::from_millis(1500));
        assert!(observer.events().is_empty());
    }

    #[tokio::test]
    async fn test_request_timeout_bounds_whole_request() {
        let url = spawn_delayed_server(Duration::from_secs(3)).await;

        let observer = Arc::new(RecordingObserver::default());
        let settings = ProbeSettings {
            request_timeout: Some(Duration::from_millis(300)),
            ..ProbeSettings::default()
        };
        let checker = HttpStatusChecker::new(TimeoutResolver::new(observer), settings);
        let result = checker.check(&create_monitor(&url, "5s")).await;

        assert!(!result.is_success());
        assert!(!result.message().is_empty());
        assert!(result.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    #[serial]
    async fn test_environment_proxy_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        std::env::set_var("HTTP_PROXY", "http://127.0.0.1:1");
        std::env::set_var("http_proxy", "http://127.0.0.1:1");

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "5s")).await;

        std::env::remove_var("HTTP_PROXY");
        std::env::remove_var("http_proxy");

        mock.assert_async().await;
        assert!(result.is_success());
    }
}
