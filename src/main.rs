use anyhow::Context;
use clap::Parser;
use dojo_roster::domain::ports::ConfigProvider;
use dojo_roster::utils::{logger, validation::Validate};
use dojo_roster::{CliConfig, Console, DojoConfig, TextLogSink};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            DojoConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => DojoConfig::default(),
    }
    .with_overrides(cli.log_path.clone(), cli.initial_capacity);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        log_path = config.log_path(),
        initial_capacity = config.initial_capacity(),
        "starting dojo roster"
    );

    let sink = TextLogSink::new(config.log_path());
    let stdin = io::stdin();
    let mut console = Console::from_config(stdin.lock(), io::stdout(), sink, &config);
    console.run().context("console session aborted")?;

    Ok(())
}
