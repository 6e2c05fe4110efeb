use anyhow::Context;
use car_catalog::config::toml_config::TomlConfig;
use car_catalog::domain::ports::ConfigProvider;
use car_catalog::utils::{logger, validation::Validate};
use car_catalog::{LocalStorage, SiteEngine};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-catalog")]
#[command(about = "Render catalog pages with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalog.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the page marker from config (`catalog` or `car`)
    #[arg(long)]
    page: Option<String>,

    /// Override the car page query string from config
    #[arg(long)]
    query: Option<String>,

    /// Dry run - show what would be rendered without loading the catalog
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based catalog renderer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(page) = args.page {
        tracing::info!("🔧 Page overridden to: {}", page);
        config.site.page = page;
    }
    if let Some(query) = args.query {
        tracing::info!("🔧 Query overridden to: {}", query);
        config.selection.get_or_insert_with(Default::default).query = Some(query);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be loaded or written");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = SiteEngine::new(storage, config);

    let rendered = engine.run().await.context("rendering failed")?;
    println!("📁 {} ({:?})", rendered.output_path, rendered.status);

    let exit_code = rendered.status.exit_code();
    if exit_code > 0 {
        if let Some(hint) = rendered.hint {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let options = config.site_options();
    let selection = config.selection();

    println!("📋 Configuration Summary:");
    println!("  Page: {}", config.page_marker());
    println!("  Source: {}", config.catalog_source());
    println!("  Output: {}", config.output_path());
    println!("  Grid page: {}", options.grid_page);
    println!("  Detail page: {}", options.detail_page);

    if let Some(brand) = &selection.brand {
        println!("  Brand filter: {}", brand);
    }
    if let Some(year) = &selection.year {
        println!("  Year filter: {}", year);
    }
    if !selection.sort.as_str().is_empty() {
        println!("  Sort: {}", selection.sort.as_str());
    }
    if !config.query().is_empty() {
        println!("  Query: {}", config.query());
    }

    println!();
}
