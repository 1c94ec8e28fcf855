//! 检测结果数据结构
//!
//! 定义单次探测的结果类型以及命令行使用的检测报告

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 失败结果缺少说明时使用的兜底信息
const UNKNOWN_FAILURE: &str = "check failed without diagnostic";

/// 单次探测结果
///
/// 由检测器创建后交给调用方，构造之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    success: bool,
    message: String,
    elapsed_nanos: i64,
}

impl CheckResult {
    /// 创建成功结果
    pub fn success(message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: true,
            message: message.into(),
            elapsed_nanos: duration_to_nanos(elapsed),
        }
    }

    /// 创建失败结果
    ///
    /// 失败结果总是带有非空的诊断信息
    pub fn failure(message: impl Into<String>, elapsed: Duration) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = UNKNOWN_FAILURE.to_string();
        }

        Self {
            success: false,
            message,
            elapsed_nanos: duration_to_nanos(elapsed),
        }
    }

    /// 检测是否成功
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// 结果说明
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 网络操作耗时（纳秒）
    pub fn elapsed_nanos(&self) -> i64 {
        self.elapsed_nanos
    }

    /// 网络操作耗时
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.max(0) as u64)
    }

    /// 获取耗时（毫秒）
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

fn duration_to_nanos(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
}

/// 检测报告，附带监控项信息和检测时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// 监控项名称
    pub monitor: String,
    /// 目标URL
    pub url: String,
    /// 检测器类型
    pub kind: String,
    /// 检测时间戳
    pub checked_at: DateTime<Utc>,
    /// 检测结果
    pub result: CheckResult,
}

impl CheckReport {
    /// 创建新的检测报告
    pub fn new(monitor: String, url: String, kind: String, result: CheckResult) -> Self {
        Self {
            monitor,
            url,
            kind,
            checked_at: Utc::now(),
            result,
        }
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 单行文本格式
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {} {} ({}, {}ms) {}",
            if self.result.is_success() { "UP" } else { "DOWN" },
            self.monitor,
            self.url,
            self.kind,
            self.result.elapsed_ms(),
            self.result.message()
        )
    }
}
