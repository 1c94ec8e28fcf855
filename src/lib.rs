//! Uptime Probe - 可插拔的HTTP可用性探测
//!
//! 根据监控项配置执行一次网络检测，返回结构化的检测结果：
//! - 检测器注册表，按类型标识解析检测器
//! - HTTP状态检测（HEAD，状态码必须为200）
//! - HTTP内容检测（GET，响应体匹配正则表达式）
//! - 只约束连接阶段的超时，解析失败回退到60秒
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;

// 重新导出主要类型
pub use config::{Config, GlobalConfig, MonitorConfig};
pub use error::{ConfigError, ProbeError};
pub use health::{CheckResult, Checker, CheckerRegistry};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
