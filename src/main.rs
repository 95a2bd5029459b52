use anyhow::Result;
use clap::Parser;
use job_analytics::app_log;
use job_analytics::cli::{handle_command, Cli};
use job_analytics::environment::EnvironmentConfig;
use job_analytics::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let environment = EnvironmentConfig::get_environment();
    let config = EnvironmentConfig::load()?;

    // Initialize logging before any analysis runs
    logging::init(&config.log_path, &config.log_level)?;
    config.log_summary(&environment);

    if let Err(e) = handle_command(cli, config.data_path, config.analysis).await {
        app_log!(error, "Command failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
