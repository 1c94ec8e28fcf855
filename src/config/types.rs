//! 配置数据结构定义
//!
//! 定义监控配置结构体和验证逻辑

use crate::health::content::compile_pattern;
use crate::health::registry::CheckerRegistry;
use crate::health::{HTTP_CONTENT, HTTP_STATUS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// 主配置结构，包含全局配置和监控项列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 全局配置项
    #[serde(default)]
    pub global: GlobalConfig,
    /// 监控项列表
    pub monitors: Vec<MonitorConfig>,
}

/// 全局配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 日志文件路径（可选，设置后不再输出到控制台）
    pub log_file: Option<PathBuf>,
    /// 最大并发检测数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_checks: usize,
    /// 整个请求的截止时间（可选，独立于连接超时）
    pub request_timeout: Option<String>,
    /// 自定义 User-Agent
    pub user_agent: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            max_concurrent_checks: default_max_concurrent(),
            request_timeout: None,
            user_agent: None,
        }
    }
}

impl GlobalConfig {
    /// 解析整个请求的截止时间
    pub fn request_timeout(&self) -> Result<Option<Duration>, String> {
        match &self.request_timeout {
            Some(spec) => humantime::parse_duration(spec)
                .map(Some)
                .map_err(|e| format!("无效的请求超时 {spec}: {e}")),
            None => Ok(None),
        }
    }
}

/// 监控项配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// 监控项名称
    #[serde(default)]
    pub name: String,
    /// 目标URL
    pub url: String,
    /// 连接超时，例如 `5s`
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// 内容匹配正则表达式，仅 http-content 使用
    #[serde(default)]
    pub content: String,
    /// 检测器类型
    #[serde(default = "default_kind")]
    pub kind: String,
}

impl MonitorConfig {
    /// 显示名称，未命名时使用URL
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}

// 默认值函数
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_concurrent() -> usize {
    10
}
fn default_timeout() -> String {
    "60s".to_string()
}
fn default_kind() -> String {
    HTTP_STATUS.to_string()
}

/// 验证单个监控项
///
/// # 参数
/// * `monitor` - 要验证的监控项
/// * `registry` - 用于判断检测器类型是否受支持的注册表
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_monitor(monitor: &MonitorConfig, registry: &CheckerRegistry) -> Result<(), String> {
    let name = monitor.display_name();

    // 验证URL格式
    if !monitor.url.starts_with("http://") && !monitor.url.starts_with("https://") {
        return Err(format!("监控项 {} 的URL格式无效", name));
    }

    // 验证检测器类型
    if !registry.is_supported(&monitor.kind) {
        return Err(format!(
            "监控项 {} 的检测器类型 {} 无效，支持的类型: {:?}",
            name,
            monitor.kind,
            registry.supported_kinds()
        ));
    }

    // 验证内容匹配模式
    if monitor.kind == HTTP_CONTENT {
        if monitor.content.is_empty() {
            return Err(format!("监控项 {} 必须指定内容匹配模式", name));
        }
        if let Err(e) = compile_pattern(&monitor.content) {
            return Err(format!("监控项 {} 的内容匹配模式无效: {}", name, e));
        }
    }

    Ok(())
}

/// 配置验证函数，检测器类型按内置注册表验证
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    validate_config_with(config, &CheckerRegistry::default())
}

/// 使用指定注册表验证配置
pub fn validate_config_with(config: &Config, registry: &CheckerRegistry) -> Result<(), String> {
    if config.global.max_concurrent_checks == 0 {
        return Err("最大并发检测数不能为0".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.global.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.global.log_level, valid_log_levels
        ));
    }

    config.global.request_timeout()?;

    if config.monitors.is_empty() {
        return Err("至少需要配置一个监控项".to_string());
    }

    let mut names = HashSet::new();
    for monitor in &config.monitors {
        if monitor.name.trim().is_empty() {
            return Err(format!("监控项 {} 的名称不能为空", monitor.url));
        }
        if !names.insert(monitor.name.as_str()) {
            return Err(format!("监控项名称重复: {}", monitor.name));
        }

        validate_monitor(monitor, registry)?;
    }

    Ok(())
}
