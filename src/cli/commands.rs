//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands, OutputFormat};
use crate::config::{validate_monitor, Config, ConfigLoader, MonitorConfig, TomlConfigLoader};
use crate::error::{ConfigError, ProbeError, Result};
use crate::health::{CheckReport, Checker, CheckerRegistry, ProbeSettings, TracingObserver};
use crate::logging::LoggingSystem;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

/// 验证配置命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Validate {
            config_path,
            verbose,
        } = &args.command
        {
            let path = config_path.clone().unwrap_or_else(|| args.get_config_path());
            let loader = TomlConfigLoader::default();
            let config = loader.load_from_file(&path).await?;

            println!("配置文件有效: {}", path.display());
            if *verbose {
                println!("监控项数量: {}", config.monitors.len());
                for monitor in &config.monitors {
                    println!(
                        "  - {} [{}] {} (timeout: {})",
                        monitor.name, monitor.kind, monitor.url, monitor.timeout
                    );
                }
            }
        }
        Ok(())
    }
}

/// 一次性检测命令
pub struct CheckCommand {
    logging: Arc<LoggingSystem>,
    /// 已加载的配置，为空时执行前从配置文件加载
    config: Option<Config>,
}

impl CheckCommand {
    /// 创建检测命令
    pub fn new(logging: Arc<LoggingSystem>) -> Self {
        Self {
            logging,
            config: None,
        }
    }

    /// 使用已加载的配置
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }
}

#[async_trait]
impl Command for CheckCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Check { monitor, format } = &args.command {
            let config = match &self.config {
                Some(config) => config.clone(),
                None => {
                    TomlConfigLoader::default()
                        .load_from_file(args.get_config_path())
                        .await?
                }
            };
            self.run_checks(config, monitor.as_deref(), format).await
        } else {
            Ok(())
        }
    }
}

impl CheckCommand {
    /// 执行检测并输出结果
    pub async fn run_checks(
        &self,
        config: Config,
        monitor_name: Option<&str>,
        format: &OutputFormat,
    ) -> Result<()> {
        let registry = build_registry(&config)?;
        let concurrency = config.global.max_concurrent_checks.max(1);

        let monitors: Vec<MonitorConfig> = match monitor_name {
            Some(name) => config
                .monitors
                .into_iter()
                .filter(|m| m.name == name)
                .collect(),
            None => config.monitors,
        };

        if monitors.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "未找到名为 '{}' 的监控项",
                monitor_name.unwrap_or_default()
            ))
            .into());
        }

        let reports = check_all(&registry, monitors, concurrency).await?;
        for report in &reports {
            self.logging.check_report_log(report);
        }
        print_reports(&reports, format)?;

        ensure_all_up(&reports)
    }
}

/// 单次探测命令
pub struct ProbeCommand;

#[async_trait]
impl Command for ProbeCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Probe {
            url,
            kind,
            timeout,
            content,
            request_timeout,
            format,
        } = &args.command
        {
            let mut settings = ProbeSettings::default();
            if let Some(spec) = request_timeout {
                let deadline = humantime::parse_duration(spec).map_err(|e| {
                    ConfigError::ValidationError(format!("无效的请求超时 {spec}: {e}"))
                })?;
                settings.request_timeout = Some(deadline);
            }
            let registry = CheckerRegistry::new(settings, Arc::new(TracingObserver));

            // 未注册的类型直接报告 unsupported checker
            registry.resolve(kind)?;

            let monitor = MonitorConfig {
                name: url.clone(),
                url: url.clone(),
                timeout: timeout.clone(),
                content: content.clone(),
                kind: kind.clone(),
            };
            validate_monitor(&monitor, &registry).map_err(ConfigError::ValidationError)?;

            let reports = check_all(&registry, vec![monitor], 1).await?;
            print_reports(&reports, format)?;

            ensure_all_up(&reports)
        } else {
            Ok(())
        }
    }
}

/// 根据全局配置构建检测器注册表
pub fn build_registry(config: &Config) -> Result<CheckerRegistry> {
    let mut settings = ProbeSettings::default();
    settings.request_timeout = config
        .global
        .request_timeout()
        .map_err(ConfigError::ValidationError)?;
    if let Some(user_agent) = &config.global.user_agent {
        settings.user_agent = user_agent.clone();
    }

    Ok(CheckerRegistry::new(settings, Arc::new(TracingObserver)))
}

/// 对所有监控项各执行一次检测，并发数受 `concurrency` 限制
///
/// 任一监控项的检测器类型未注册时，不执行任何检测
pub async fn check_all(
    registry: &CheckerRegistry,
    monitors: Vec<MonitorConfig>,
    concurrency: usize,
) -> Result<Vec<CheckReport>> {
    let mut jobs = Vec::with_capacity(monitors.len());
    for monitor in monitors {
        let checker = registry.resolve(&monitor.kind)?;
        jobs.push((checker, monitor));
    }

    let pending: Vec<_> = jobs
        .into_iter()
        .map(|(checker, monitor)| run_one(checker, monitor))
        .collect();

    let reports = stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(reports)
}

async fn run_one(checker: Arc<dyn Checker>, monitor: MonitorConfig) -> CheckReport {
    let result = checker.check(&monitor).await;
    CheckReport::new(
        monitor.display_name().to_string(),
        monitor.url.clone(),
        monitor.kind.clone(),
        result,
    )
}

fn print_reports(reports: &[CheckReport], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }
        OutputFormat::Text => {
            for report in reports {
                println!("{}", report.to_line());
            }
        }
    }
    Ok(())
}

fn ensure_all_up(reports: &[CheckReport]) -> Result<()> {
    let failed = reports.iter().filter(|r| !r.result.is_success()).count();
    if failed > 0 {
        return Err(ProbeError::ChecksFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}
