//! ss3 - interactive S3 bucket browser
//!
//! Browse the folders of an S3 bucket page by page and download files
//! from the terminal.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ss3_cli::Cli;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with the screen
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = ss3_cli::run(cli).await;

    std::process::exit(exit_code.as_i32());
}
