//! HTTP内容检测器
//!
//! 发送 GET 请求并读取完整响应体，内容匹配正则表达式时判定为成功

use crate::config::MonitorConfig;
use crate::error::ConfigError;
use crate::health::checker::{classify_request_error, format_error_chain, Checker, ProbeSettings};
use crate::health::result::CheckResult;
use crate::health::timeout::TimeoutResolver;
use async_trait::async_trait;
use regex::Regex;
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP内容检测器类型标识
pub const HTTP_CONTENT: &str = "http-content";

/// 编译内容匹配模式
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// HTTP内容检测器
#[derive(Debug, Clone)]
pub struct HttpContentChecker {
    /// 超时解析器
    timeouts: TimeoutResolver,
    /// HTTP设置
    settings: ProbeSettings,
}

impl HttpContentChecker {
    /// 创建新的HTTP内容检测器
    pub fn new(timeouts: TimeoutResolver, settings: ProbeSettings) -> Self {
        Self { timeouts, settings }
    }
}

#[async_trait]
impl Checker for HttpContentChecker {
    fn kind(&self) -> &str {
        HTTP_CONTENT
    }

    async fn check(&self, monitor: &MonitorConfig) -> CheckResult {
        let pattern = &monitor.content;

        // 模式无法编译时不发起请求
        let matcher = match compile_pattern(pattern) {
            Ok(matcher) => matcher,
            Err(e) => return CheckResult::failure(e.to_string(), Duration::ZERO),
        };

        let connect_timeout = self.timeouts.resolve(&monitor.timeout);

        let client = match self.settings.build_client(connect_timeout) {
            Ok(client) => client,
            Err(e) => return CheckResult::failure(format_error_chain(&e), Duration::ZERO),
        };

        let start_time = Instant::now();
        let response_result = client.get(&monitor.url).send().await;
        let elapsed = start_time.elapsed();

        let response = match response_result {
            Ok(response) => response,
            Err(e) => {
                debug!(
                    monitor = %monitor.name,
                    url = %monitor.url,
                    failure = classify_request_error(&e),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "HTTP内容检测请求失败"
                );
                return CheckResult::failure(format_error_chain(&e), elapsed);
            }
        };

        // bytes() 读取完整响应体并消费响应
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return CheckResult::failure(
                    format!("Failed to read response body: {}", format_error_chain(&e)),
                    elapsed,
                )
            }
        };
        let text = String::from_utf8_lossy(&body);
        let found = matcher.is_match(&text);

        debug!(
            monitor = %monitor.name,
            url = %monitor.url,
            body_bytes = body.len(),
            found = found,
            elapsed_ms = elapsed.as_millis() as u64,
            "HTTP内容检测完成"
        );

        if found {
            CheckResult::success(format!("Found content {pattern}"), elapsed)
        } else {
            CheckResult::failure(format!("Missing content {pattern}"), elapsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::observer::RecordingObserver;
    use std::sync::Arc;

    fn create_checker() -> (HttpContentChecker, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let checker = HttpContentChecker::new(
            TimeoutResolver::new(observer.clone()),
            ProbeSettings::default(),
        );
        (checker, observer)
    }

    fn create_monitor(url: &str, content: &str) -> MonitorConfig {
        MonitorConfig {
            name: "content-test".to_string(),
            url: url.to_string(),
            timeout: "5s".to_string(),
            content: content.to_string(),
            kind: HTTP_CONTENT.to_string(),
        }
    }

    #[tokio::test]
    async fn test_content_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><title>Welcome home</title></html>")
            .expect(1)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "Welcome")).await;

        mock.assert_async().await;
        assert!(result.is_success());
        assert_eq!(result.message(), "Found content Welcome");
        assert!(result.elapsed_nanos() >= 0);
    }

    #[tokio::test]
    async fn test_content_regex_match() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/version")
            .with_body(r#"{"version":"1.24.3"}"#)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let pattern = r#""version":"\d+\.\d+\.\d+""#;
        let result = checker
            .check(&create_monitor(&format!("{}/version", server.url()), pattern))
            .await;

        assert!(result.is_success());
        assert_eq!(result.message(), format!("Found content {pattern}"));
    }

    #[tokio::test]
    async fn test_content_missing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_body("maintenance mode")
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "Welcome")).await;

        assert!(!result.is_success());
        assert_eq!(result.message(), "Missing content Welcome");
    }

    #[tokio::test]
    async fn test_status_code_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(500)
            .with_body("Welcome, but broken")
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "Welcome")).await;

        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_invalid_pattern_skips_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_body("anything")
            .expect(0)
            .create_async()
            .await;

        let (checker, _) = create_checker();
        let result = checker.check(&create_monitor(&server.url(), "(unclosed")).await;

        mock.assert_async().await;
        assert!(!result.is_success());
        assert!(result.message().starts_with("Invalid content pattern (unclosed"));
        assert_eq!(result.elapsed_nanos(), 0);
    }

    #[test]
    fn test_compile_pattern_error() {
        let err = compile_pattern("a{2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
        assert!(err.to_string().starts_with("Invalid content pattern a{2: "));
    }

    #[tokio::test]
    async fn test_unreachable_target() {
        let (checker, _) = create_checker();
        let result = checker
            .check(&create_monitor("http://127.0.0.1:1/", "Welcome"))
            .await;

        assert!(!result.is_success());
        assert!(!result.message().is_empty());
        assert!(!result.message().starts_with("Missing content"));
    }

    #[tokio::test]
    async fn test_malformed_timeout_still_runs() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_body("ok")
            .create_async()
            .await;

        let (checker, observer) = create_checker();
        let mut monitor = create_monitor(&server.url(), "ok");
        monitor.timeout = "soon".to_string();
        let result = checker.check(&monitor).await;

        assert!(result.is_success());
        assert_eq!(observer.events().len(), 1);
    }
}
