//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::health::HTTP_STATUS;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Uptime Probe - HTTP可用性探测工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "uptime-probe",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "UPTIME_PROBE_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别，未指定时使用配置文件中的 `log_level`
    #[arg(
        short,
        long,
        value_enum,
        help = "日志级别（覆盖配置文件）",
        env = "UPTIME_PROBE_LOG_LEVEL"
    )]
    pub log_level: Option<LogLevel>,

    /// 是否输出JSON格式日志
    #[arg(long, help = "输出JSON格式日志")]
    pub json_logs: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 对配置文件中的监控项各执行一次检测
    Check {
        /// 监控项名称（可选，不指定则检测所有监控项）
        #[arg(value_name = "MONITOR", help = "监控项名称")]
        monitor: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },

    /// 对单个URL执行一次检测
    Probe {
        /// 目标URL
        #[arg(value_name = "URL", help = "目标URL")]
        url: String,

        /// 检测器类型
        #[arg(short, long, default_value = HTTP_STATUS, help = "检测器类型")]
        kind: String,

        /// 连接超时
        #[arg(short, long, default_value = "60s", help = "连接超时，例如 5s")]
        timeout: String,

        /// 内容匹配正则表达式
        #[arg(long, default_value = "", help = "内容匹配正则表达式（http-content）")]
        content: String,

        /// 整个请求的截止时间
        #[arg(long, value_name = "DURATION", help = "整个请求的截止时间（可选）")]
        request_timeout: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径
        #[arg(value_name = "FILE", help = "配置文件路径")]
        config_path: Option<PathBuf>,

        /// 是否显示详细信息
        #[arg(short, long, help = "显示详细信息")]
        verbose: bool,
    },

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}

impl Args {
    /// 获取配置文件路径
    pub fn get_config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::get_default_config_path)
    }
}
