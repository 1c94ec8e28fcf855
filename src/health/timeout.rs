//! 超时解析
//!
//! 把监控项中的超时字符串解析为连接阶段的超时时间

use crate::health::observer::ProbeObserver;
use std::sync::Arc;
use std::time::Duration;

/// 超时无法解析时使用的默认值
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// 超时解析器
///
/// 解析失败时回退到 [`DEFAULT_TIMEOUT`]，并通知观察者，不向调用方返回错误。
#[derive(Clone)]
pub struct TimeoutResolver {
    observer: Arc<dyn ProbeObserver>,
}

impl TimeoutResolver {
    /// 创建新的超时解析器
    pub fn new(observer: Arc<dyn ProbeObserver>) -> Self {
        Self { observer }
    }

    /// 解析超时配置
    ///
    /// # 参数
    /// * `spec` - 超时字符串，例如 `5s`、`250ms`、`1h30m`
    ///
    /// # 返回
    /// * `Duration` - 连接阶段的超时时间
    pub fn resolve(&self, spec: &str) -> Duration {
        match humantime::parse_duration(spec.trim()) {
            Ok(timeout) => timeout,
            Err(_) => {
                self.observer.timeout_defaulted(spec, DEFAULT_TIMEOUT);
                DEFAULT_TIMEOUT
            }
        }
    }
}

impl std::fmt::Debug for TimeoutResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutResolver")
            .field("default", &DEFAULT_TIMEOUT)
            .finish()
    }
}
