use clap::Parser;
use wordcount::utils::logger;
use wordcount::{CliConfig, LocalStorage, PipelineDriver, RunConfig, WordCountPipeline};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證配置
    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(".".to_string());
    let pipeline = WordCountPipeline::new(storage, config);
    // 大小與開始時間在計數前印出，輸出失敗時也保留
    let mut driver = PipelineDriver::new_with_monitoring(pipeline, monitor_enabled).on_start(
        |source, started_at| {
            println!("{}", source.size_bytes);
            println!("{}", started_at.to_rfc3339());
        },
    );

    match driver.run().await {
        Ok(report) => {
            println!("{}", report.finished_at.to_rfc3339());
            println!(
                "✅ Counted {} words ({} distinct) in {} lines",
                report.total_tokens, report.distinct_tokens, report.lines
            );
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Word count failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
