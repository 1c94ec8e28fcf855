//! Uptime Probe 主程序入口
//!
//! 对监控项执行一次性HTTP探测

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, error};
use uptime_probe::cli::args::{Args, Commands};
use uptime_probe::cli::commands::{
    CheckCommand, Command, ProbeCommand, ValidateCommand, VersionCommand,
};
use uptime_probe::config::{Config, ConfigLoader, TomlConfigLoader};
use uptime_probe::error::ProbeError;
use uptime_probe::logging::{LogConfig, LoggingSystem};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // check 命令先加载配置，日志设置取自其中的 [global]
    let preloaded = match &args.command {
        Commands::Check { .. } => Some(
            TomlConfigLoader::default()
                .load_from_file(args.get_config_path())
                .await,
        ),
        _ => None,
    };

    // 初始化日志系统
    let global = match &preloaded {
        Some(Ok(config)) => Some(&config.global),
        _ => None,
    };
    let log_config = LogConfig::resolve(
        args.log_level.clone().map(Into::into),
        args.json_logs,
        global,
    );

    let logging_system =
        Arc::new(LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?);

    debug!("Uptime Probe v{} 启动", uptime_probe::VERSION);

    let config = match preloaded {
        Some(Err(e)) => {
            error!("命令执行失败: {}", e);
            std::process::exit(1);
        }
        Some(Ok(config)) => Some(config),
        None => None,
    };

    // 执行命令
    if let Err(e) = execute_command(&args, logging_system, config).await {
        match &e {
            ProbeError::ChecksFailed { .. } => error!("{}", e),
            _ => error!("命令执行失败: {}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// 执行CLI命令
async fn execute_command(
    args: &Args,
    logging_system: Arc<LoggingSystem>,
    config: Option<Config>,
) -> uptime_probe::error::Result<()> {
    match &args.command {
        Commands::Check { .. } => {
            let mut command = CheckCommand::new(logging_system);
            if let Some(config) = config {
                command = command.with_config(config);
            }
            command.execute(args).await
        }
        Commands::Probe { .. } => ProbeCommand.execute(args).await,
        Commands::Validate { .. } => ValidateCommand.execute(args).await,
        Commands::Version { .. } => VersionCommand.execute(args).await,
    }
}
