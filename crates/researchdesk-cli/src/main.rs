use anyhow::Result;
use clap::Parser;
use researchdesk_cli::commands;
use researchdesk_cli::config::{CliConfig, Command};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(
                        "researchdesk_cli=info,researchdesk_service=info",
                    )
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::parse();
    if !matches!(config.command, Command::Render { .. }) {
        debug!("api: {} ({})", config.api_url, config.api_version);
    }

    let service = config.build_service();
    match commands::execute(&config.command, config.format, &service).await {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("{e:#}");
            Err(e)
        }
    }
}
