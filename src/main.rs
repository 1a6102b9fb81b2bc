use clap::Parser;
use instance_report::gcp::{build_http_client, GcpClients};
use instance_report::utils::error::ErrorSeverity;
use instance_report::utils::{logger, validation::Validate};
use instance_report::{CliConfig, CliSettings, EtlEngine, LocalStorage, ReportPipeline, Result};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting instance-report CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let resolved = match config.resolve().and_then(|resolved| {
        resolved.validate()?;
        Ok(resolved)
    }) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(resolved, config.monitor).await {
        Ok(location) => {
            tracing::info!("✅ Instance report completed successfully!");
            println!("✅ Report saved to: {}", location);
        }
        Err(e) => {
            tracing::error!(
                "❌ Instance report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(resolved: CliSettings, monitor: bool) -> Result<String> {
    let clients = GcpClients::from_settings(&resolved.settings, build_http_client()?);

    match resolved.output_path {
        Some(output_path) => {
            let storage = LocalStorage::new(output_path);
            let pipeline = ReportPipeline::new(storage, clients.compute, resolved.settings);
            EtlEngine::new_with_monitoring(pipeline, monitor).run().await
        }
        None => {
            let pipeline = ReportPipeline::new(clients.storage, clients.compute, resolved.settings);
            EtlEngine::new_with_monitoring(pipeline, monitor).run().await
        }
    }
}
