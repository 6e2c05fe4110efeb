use car_catalog::utils::{logger, validation::Validate};
use car_catalog::{CliConfig, LocalStorage, SiteEngine};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting car-catalog CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let print_markup = config.stdout;
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = SiteEngine::new(storage, config);

    match engine.run().await {
        Ok(rendered) => {
            if print_markup {
                println!("{}", rendered.markup);
            }
            tracing::info!("📁 Page saved to: {}", rendered.output_path);
            eprintln!("📁 {} ({:?})", rendered.output_path, rendered.status);

            let exit_code = rendered.status.exit_code();
            if exit_code > 0 {
                if let Some(hint) = rendered.hint {
                    eprintln!("💡 {}", hint);
                }
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            tracing::error!("❌ Rendering failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
