use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tracing::{error, info};

use localize_cli::config::{Cli, Command, LocalizerConfig};
use localize_cli::resource_localizer::ResourceLocalizer;
use localize_cli::resource_scanner;
use localize_cli::stats::{format_duration, print_localize_stats};
use localize_cli::utils::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Scan { file } => {
            // 扫描是纯只读操作，直接打印分组报告
            match resource_scanner::scan_file(&file) {
                Ok(report) => report.print(),
                Err(e) => {
                    error!("❌ 扫描失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Localize {
            base_dir,
            index,
            origin,
            user_agent,
            timeout,
            stats,
        } => {
            if !cli.quiet {
                info!("🚀 启动资源本地化");
                info!("📂 站点目录: {}", base_dir.display());
                info!("🌐 回退源站: {}", origin);
            }

            let config = LocalizerConfig::new(&base_dir)
                .with_index_file(&index)
                .with_origin(&origin)
                .with_user_agent(&user_agent)
                .with_timeout(timeout);

            let localizer = ResourceLocalizer::new(config)?;

            // 开始性能计时
            let total_start = Instant::now();

            match localizer.run().await {
                Ok(run_stats) => {
                    let total_duration = total_start.elapsed();

                    if !cli.quiet {
                        info!(
                            "✅ 本地化完成！总耗时: {}",
                            format_duration(total_duration)
                        );
                    }

                    // 显示统计报告
                    if stats || cli.verbose {
                        print_localize_stats(&run_stats, total_duration);
                    }
                }
                Err(e) => {
                    error!("❌ 本地化失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
