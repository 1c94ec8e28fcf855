//! 日志系统模块
//!
//! 提供结构化日志配置和管理功能

use crate::config::GlobalConfig;
use crate::health::CheckReport;
use log::LevelFilter;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局日志初始化状态
#[derive(Debug, Default)]
struct GlobalLoggingState {
    /// 是否已初始化
    initialized: bool,
    /// 初始化失败时的错误信息
    init_error: Option<String>,
    /// 当前配置
    current_config: Option<LogConfig>,
}

/// 全局日志状态管理器
static GLOBAL_LOGGING_STATE: OnceLock<Mutex<GlobalLoggingState>> = OnceLock::new();

fn lock_state() -> MutexGuard<'static, GlobalLoggingState> {
    GLOBAL_LOGGING_STATE
        .get_or_init(|| Mutex::new(GlobalLoggingState::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 日志文件路径（可选）
    pub file_path: Option<PathBuf>,
    /// 是否输出到控制台
    pub console: bool,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file_path: None,
            console: true,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// 合并命令行参数与配置文件中的日志设置
    ///
    /// 命令行指定的级别优先，其次是 `global.log_level`，都没有时使用 info。
    /// 配置了 `global.log_file` 时日志写入该文件，不再输出到控制台。
    pub fn resolve(
        cli_level: Option<LevelFilter>,
        json_format: bool,
        global: Option<&GlobalConfig>,
    ) -> Self {
        let config_level = global.and_then(|g| g.log_level.parse::<LevelFilter>().ok());
        let file_path = global.and_then(|g| g.log_file.clone());

        Self {
            level: cli_level.or(config_level).unwrap_or(LevelFilter::Info),
            console: file_path.is_none(),
            file_path,
            json_format,
        }
    }
}

/// 日志系统管理器
#[derive(Debug)]
pub struct LoggingSystem {
    /// 配置
    config: LogConfig,
}

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 进程内只初始化一次，重复调用直接返回新的句柄
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        Self::setup_logging_with_options(config, false)
    }

    /// 初始化日志系统（带选项）
    ///
    /// # 参数
    /// * `config` - 日志配置
    /// * `force_reinit` - 是否强制重新初始化（主要用于测试）
    pub fn setup_logging_with_options(
        config: LogConfig,
        force_reinit: bool,
    ) -> anyhow::Result<Self> {
        {
            let state = lock_state();
            if state.initialized && !force_reinit {
                return match &state.init_error {
                    None => Ok(Self {
                        config: config.clone(),
                    }),
                    Some(e) => Err(anyhow::anyhow!("日志系统之前初始化失败: {}", e)),
                };
            }
        }

        let init_result = Self::perform_initialization(&config);

        {
            let mut state = lock_state();
            state.initialized = true;
            state.current_config = Some(config.clone());
            state.init_error = init_result.as_ref().err().map(|e| e.to_string());
        }

        init_result?;
        Ok(Self { config })
    }

    /// 执行实际的日志系统初始化
    fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
        Self::init_log_tracer()?;
        Self::init_tracing_subscriber(config)?;
        Ok(())
    }

    /// 初始化 LogTracer（log crate 到 tracing 的桥接）
    fn init_log_tracer() -> anyhow::Result<()> {
        use tracing_log::LogTracer;

        static LOG_TRACER_INIT: OnceLock<Result<(), String>> = OnceLock::new();

        let result = LOG_TRACER_INIT.get_or_init(|| LogTracer::init().map_err(|e| e.to_string()));

        result
            .as_ref()
            .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;
        Ok(())
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        let env_filter =
            EnvFilter::from_default_env().add_directive(Self::convert_level_to_directive(config.level));

        let result = match (&config.file_path, config.console) {
            (Some(file_path), false) => {
                let file = std::fs::File::create(file_path)
                    .map_err(|e| anyhow::anyhow!("创建日志文件失败: {}", e))?;
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true);

                registry().with(env_filter).with(file_layer).try_init()
            }
            _ => {
                let fmt_layer = if config.json_format {
                    fmt::layer()
                        .json()
                        .with_timer(fmt::time::ChronoUtc::rfc_3339())
                        .with_file(true)
                        .with_line_number(true)
                        .boxed()
                } else {
                    fmt::layer()
                        .with_timer(fmt::time::ChronoUtc::rfc_3339())
                        .with_ansi(true)
                        .with_target(false)
                        .boxed()
                };

                registry().with(env_filter).with(fmt_layer).try_init()
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!("日志配置: {:?}", config);
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains(
                    "attempted to set a logger after the logging system was already initialized",
                ) || error_msg.contains("a global default trace dispatcher has already been set")
                {
                    // 已经初始化过了
                    tracing::debug!("日志系统已经初始化过了");
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(
                        "tracing subscriber初始化失败: {}",
                        error_msg
                    ))
                }
            }
        }
    }

    /// 将 log::LevelFilter 转换为 tracing 的指令
    fn convert_level_to_directive(level: LevelFilter) -> Directive {
        use tracing_subscriber::filter::LevelFilter as TracingLevel;
        match level {
            LevelFilter::Off => Directive::from(TracingLevel::OFF),
            LevelFilter::Error => Directive::from(tracing::Level::ERROR),
            LevelFilter::Warn => Directive::from(tracing::Level::WARN),
            LevelFilter::Info => Directive::from(tracing::Level::INFO),
            LevelFilter::Debug => Directive::from(tracing::Level::DEBUG),
            LevelFilter::Trace => Directive::from(tracing::Level::TRACE),
        }
    }

    /// 检查日志系统是否已初始化
    pub fn is_initialized() -> bool {
        lock_state().initialized
    }

    /// 获取当前日志配置（如果已初始化）
    pub fn current_config() -> Option<LogConfig> {
        lock_state().current_config.clone()
    }

    /// 重置日志系统状态（主要用于测试）
    #[cfg(test)]
    pub fn reset_for_testing() {
        let mut state = lock_state();
        state.initialized = false;
        state.init_error = None;
        state.current_config = None;
    }

    /// 记录检测报告日志
    pub fn check_report_log(&self, report: &CheckReport) {
        let status = if report.result.is_success() { "up" } else { "down" };

        if self.config.json_format {
            let entry = json!({
                "type": "check",
                "monitor": report.monitor,
                "url": report.url,
                "kind": report.kind,
                "status": status,
                "elapsed_ms": report.result.elapsed_ms(),
                "message": report.result.message(),
            });
            tracing::info!("{entry}");
        } else if report.result.is_success() {
            tracing::info!(
                "CHECK: {} - {} ({}ms) {}",
                report.monitor,
                status,
                report.result.elapsed_ms(),
                report.result.message()
            );
        } else {
            tracing::warn!(
                "CHECK: {} - {} ({}ms) {}",
                report.monitor,
                status,
                report.result.elapsed_ms(),
                report.result.message()
            );
        }
    }
}
