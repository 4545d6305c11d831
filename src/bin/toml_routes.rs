use anyhow::Context;
use clap::Parser;
use port_routes::core::catalog::load_catalog;
use port_routes::core::ConfigProvider;
use port_routes::domain::pairs::cross_country_pairs;
use port_routes::utils::{logger, validation::Validate};
use port_routes::{LocalStorage, RouteEngine, RoutePipeline, TomlConfig, TransportMode};

#[derive(Parser)]
#[command(name = "toml-routes")]
#[command(about = "Compute port routes from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "routes.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be computed without calling the distance API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        anyhow::bail!(e.user_friendly_message());
    }

    display_config_summary(&config);

    let storage = LocalStorage::default();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No distance requests will be made");
        perform_dry_run(&config, &storage).await?;
        return Ok(());
    }

    let engine = RouteEngine::new(RoutePipeline::new(storage, config));
    let report = engine.run().await.context("route computation failed")?;

    for path in &report.output_paths {
        println!("📁 Output saved to: {}", path);
    }
    if report.hard_failures() > 0 {
        println!("⚠️ {} route pairs failed to resolve", report.hard_failures());
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let modes: Vec<&str> = config.modes().iter().map(|m| m.as_str()).collect();
    let formats: Vec<&str> = config.output_formats().iter().map(|f| f.extension()).collect();

    println!("📋 Configuration Summary:");
    println!("  Catalog: {}", config.ports_file());
    println!("  Distance API: {}", config.api_endpoint());
    println!("  Output: {}", config.output_path());
    println!("  Modes: {}", modes.join(", "));
    println!("  Formats: {}", formats.join(", "));
    println!("  Concurrent Requests: {}", config.concurrent_requests());
    println!("  Request Timeout: {:?}", config.request_timeout());
    println!();
}

async fn perform_dry_run(config: &TomlConfig, storage: &LocalStorage) -> anyhow::Result<()> {
    let ports = load_catalog(storage, config.ports_file())
        .await
        .context("failed to load port catalog")?;
    let pairs = cross_country_pairs(&ports).count();

    println!("🔍 Dry Run Analysis:");
    println!("  Ports: {}", ports.len());
    println!("  Cross-country pairs: {}", pairs);
    for mode in config.modes() {
        match mode {
            TransportMode::Land => println!("  land: {} distance API requests", pairs),
            TransportMode::Sea => println!("  sea: {} great-circle calculations", pairs),
        }
    }

    Ok(())
}
