use adopt_screen::config::WithOverrides;
use adopt_screen::core::ConfigProvider;
use adopt_screen::utils::validation::{validate_url, Validate};
use adopt_screen::utils::logger;
use adopt_screen::{AdoptError, CliConfig, EnvConfig, ScreeningEngine, ScreeningReport, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting adopt-screen");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(report) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
        }
        Err(e) => {
            tracing::error!("Screening failed: {} (Category: {:?})", e, e.category());
            tracing::error!("Suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<ScreeningReport, AdoptError> {
    let application = config.application()?;

    match &config.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            screen_with(config, &toml, &application).await
        }
        None => {
            let env = EnvConfig::from_env()?;
            env.validate()?;
            screen_with(config, &env, &application).await
        }
    }
}

async fn screen_with<C: ConfigProvider>(
    config: &CliConfig,
    base: &C,
    application: &adopt_screen::Application,
) -> Result<ScreeningReport, AdoptError> {
    if let Some(url) = &config.webhook_url {
        validate_url("--webhook-url", url)?;
    }

    let layered = WithOverrides::new(base, config.webhook_url.clone(), config.recipient.clone());
    let engine = ScreeningEngine::from_config(&layered)?;
    engine.screen(application).await
}
