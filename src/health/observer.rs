//! 探测过程的诊断观察者
//!
//! 检测器不直接写全局日志，而是把诊断事件交给注入的观察者

use std::time::Duration;
use tracing::warn;

/// 探测诊断观察者trait
pub trait ProbeObserver: Send + Sync {
    /// 超时配置无法解析，已回退到默认值
    ///
    /// # 参数
    /// * `configured` - 配置中的原始超时字符串
    /// * `fallback` - 实际使用的默认超时
    fn timeout_defaulted(&self, configured: &str, fallback: Duration);
}

/// 基于 tracing 的默认观察者
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProbeObserver for TracingObserver {
    fn timeout_defaulted(&self, configured: &str, fallback: Duration) {
        warn!(
            configured = configured,
            fallback_secs = fallback.as_secs(),
            "超时配置无效，使用默认超时 {}s",
            fallback.as_secs()
        );
    }
}

/// 记录诊断事件的观察者，用于测试
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub events: std::sync::Mutex<Vec<(String, Duration)>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn events(&self) -> Vec<(String, Duration)> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProbeObserver for RecordingObserver {
    fn timeout_defaulted(&self, configured: &str, fallback: Duration) {
        self.events
            .lock()
            .unwrap()
            .push((configured.to_string(), fallback));
    }
}
