//! idfmgr - ESP-IDF version manager
//!
//! Entry point for the idfmgr command-line application.

use clap::Parser;

use idfmgr::cli::output::{display_error, OutputConfig};
use idfmgr::cli::{exit_code, Cli};
use idfmgr::core::context::Context;
use idfmgr::core::global_config::GlobalConfig;
use idfmgr::infra::dirs::IdfmgrDirs;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let dirs = IdfmgrDirs::new();
    let config = match GlobalConfig::load(&dirs) {
        Ok(config) => config,
        Err(e) => {
            display_error(&anyhow::Error::from(e));
            std::process::exit(1);
        }
    };

    let output_config = OutputConfig::new(
        cli.quiet || config.output.quiet.unwrap_or(false),
        cli.json || config.output.json.unwrap_or(false),
        cli.verbose,
    );
    output_config.apply_global();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(output_config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::from_parts(&dirs, &config);

    if let Err(e) = cli.run(&ctx).await {
        display_error(&e);
        std::process::exit(exit_code(&e));
    }
}
