//! 检测器接口与HTTP公共实现
//!
//! 定义检测器trait，以及状态检测器和内容检测器共用的HTTP客户端构建和错误格式化

use crate::config::MonitorConfig;
use crate::health::result::CheckResult;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::time::Duration;

/// 检测器trait，定义单次检测接口
///
/// 所有失败都编码在 [`CheckResult`] 中，检测本身不返回错误。
#[async_trait]
pub trait Checker: Send + Sync {
    /// 检测器类型标识，例如 `http-status`
    fn kind(&self) -> &str;

    /// 执行一次检测
    ///
    /// # 参数
    /// * `monitor` - 监控项配置
    ///
    /// # 返回
    /// * `CheckResult` - 检测结果
    async fn check(&self, monitor: &MonitorConfig) -> CheckResult;
}

/// HTTP检测器的公共设置
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 整个请求的截止时间，独立于连接超时，默认不限制
    pub request_timeout: Option<Duration>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
            request_timeout: None,
        }
    }
}

impl ProbeSettings {
    /// 为单次检测构建HTTP客户端
    ///
    /// 连接超时只约束建立连接阶段；零值表示不设连接超时。
    /// 客户端直连目标，忽略环境变量中的代理设置。
    pub(crate) fn build_client(&self, connect_timeout: Duration) -> reqwest::Result<Client> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .no_proxy();

        if !connect_timeout.is_zero() {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(request_timeout) = self.request_timeout {
            builder = builder.timeout(request_timeout);
        }

        builder.build()
    }
}

/// 请求失败分类，用于结构化日志
pub(crate) fn classify_request_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_builder() {
        "builder"
    } else if error.is_request() {
        "request"
    } else if error.is_body() || error.is_decode() {
        "body"
    } else {
        "other"
    }
}

/// 格式化错误信息，包含完整的错误来源链
pub(crate) fn format_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !cause_text.is_empty() && !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}

/// 状态行文本，例如 `404 Not Found`
pub(crate) fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
