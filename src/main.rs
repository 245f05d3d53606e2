use anyhow::Context;
use clap::Parser;
use medconnect_seed::core::ConfigProvider;
use medconnect_seed::utils::{logger, validation::Validate};
use medconnect_seed::{CliConfig, HttpSeedApi, SeedData, SeedError, SeedPlan, Seeder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting medconnect-seed");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with("Configuration validation failed", &e);
    }

    let mut data = match load_dataset(&config) {
        Ok(data) => data,
        Err(e) => exit_with("Failed to load dataset", &e),
    };
    data.override_demo(config.demo_email(), config.demo_password());

    if let Err(e) = data.validate() {
        exit_with("Dataset validation failed", &e);
    }

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no request will be sent");
        print_plan(&config, &data);
        return Ok(());
    }

    let api = HttpSeedApi::from_config(&config).context("failed to build the HTTP client")?;

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("MedConnect - sample data seed");
    println!("Target: {}", api.base_url());
    println!("{}", rule);

    let seeder = Seeder::new(api, data)
        .with_likes(config.like_posts())
        .with_monitoring(config.monitor);
    let report = seeder.run().await;

    println!("\n{}", report);

    let failed = report.total_failed();
    if failed > 0 {
        tracing::warn!("{} item(s) failed; see the warnings above", failed);
    }

    Ok(())
}

fn load_dataset(config: &CliConfig) -> medconnect_seed::Result<SeedData> {
    match &config.data {
        Some(path) => {
            tracing::info!("📁 Loading dataset from: {}", path);
            SeedData::from_file(path)
        }
        None => SeedData::builtin(),
    }
}

fn exit_with(context: &str, e: &SeedError) -> ! {
    tracing::error!("❌ {}: {}", context, e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn print_plan(config: &CliConfig, data: &SeedData) {
    println!("📋 Seed plan");
    println!("  Base URL:      {}", config.base_url());
    println!(
        "  Dataset:       {}",
        config.data.as_deref().unwrap_or("built-in")
    );
    println!("{}", SeedPlan::new(data, config.like_posts()));
}
