pub mod cli;
pub mod core;
pub mod providers;

use crate::core::ConversionService;
use crate::core::config::AppConfig;
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

pub enum AppCommand {
    Interactive,
    Convert {
        from: String,
        to: String,
        amount: String,
    },
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub fn build_service(config: &AppConfig) -> Result<ConversionService> {
    let provider = ExchangeRateApiProvider::from_config(&config.provider)?;
    Ok(ConversionService::new(Arc::new(provider)))
}

/// Interactive menu session over arbitrary input and output streams.
///
/// `interrupt` produces the future that cancels a pending prompt or request.
pub async fn run_interactive<R, W, I, F>(
    config: &AppConfig,
    input: R,
    out: &mut W,
    interrupt: I,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Fn() -> F,
    F: Future<Output = ()>,
{
    let service = build_service(config)?;
    cli::menu::run(&service, &config.menu_pairs(), input, out, interrupt).await
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");
    let config = load_config(config_path)?;

    match command {
        AppCommand::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run_interactive(&config, stdin, &mut stdout, cli::ctrl_c).await
        }
        AppCommand::Convert { from, to, amount } => {
            let service = build_service(&config)?;
            cli::convert::run(&service, &from, &to, &amount).await
        }
    }
}
