use clap::Parser;
use port_routes::utils::error::ErrorSeverity;
use port_routes::utils::{logger, validation::Validate};
use port_routes::{CliConfig, LocalStorage, RouteEngine, RoutePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting port-routes CLI");

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let pipeline = RoutePipeline::new(LocalStorage::default(), config);
    let engine = RouteEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            for mode in &report.modes {
                println!(
                    "✅ {}: {} routes ({} without route), {} failed",
                    mode.mode, mode.records, mode.no_route, mode.hard_failures
                );
            }
            for path in &report.output_paths {
                println!("📁 Output saved to: {}", path);
            }
            if report.hard_failures() > 0 {
                eprintln!(
                    "⚠️ {} route pairs could not be resolved; see the *_route_failures.json reports",
                    report.hard_failures()
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Route computation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,   // 輸入資料錯誤
                ErrorSeverity::High => 1,     // 配置錯誤
                ErrorSeverity::Critical => 3, // 系統錯誤
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
