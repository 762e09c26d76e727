//! ss3 CLI library
//!
//! The interactive session and its terminal adapter. `main.rs` only parses
//! arguments, sets up logging and hands over to [`run`].

pub mod args;
pub mod command;
pub mod console;
pub mod download;
pub mod exit_code;
pub mod output;
pub mod session;

use ::console::style;
use ss3_core::{ConfigManager, Navigator, StoreFactory};
use ss3_s3::S3Factory;

pub use args::Cli;
use exit_code::ExitCode;
use output::TermConsole;
use session::{Session, SessionOptions};

/// Printed when the session ends, whatever the reason
pub const GOODBYE: &str = "Exiting...";

/// Start the backend, then run the interactive session to completion
pub async fn run(cli: Cli) -> ExitCode {
    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&format!("Failed to load configuration: {e}"));
            return ExitCode::UsageError;
        }
    };
    output::apply_color_mode(&config.defaults.color);

    let backend = match config.backend_config() {
        Ok(backend) => backend,
        Err(e) => {
            report_error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let store = match S3Factory.connect(&backend).await {
        Ok(store) => store,
        Err(e) => {
            report_error(&format!("Failed to initialise S3 client: {e}"));
            return ExitCode::from(&e);
        }
    };

    install_interrupt_handler();

    let navigator = Navigator::new(store).with_folder_timestamps(config.defaults.folder_timestamps);
    let options = SessionOptions {
        page_size: config.defaults.page_size,
        download_dir: config.defaults.download_dir.clone(),
        ..Default::default()
    };
    let mut session = Session::new(TermConsole::new(), S3Factory, backend, navigator, options)
        .with_initial_bucket(cli.bucket);

    let result = session.run().await;
    println!("\n{GOODBYE}");

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            report_error(&format!("Terminal error: {e}"));
            ExitCode::GeneralError
        }
    }
}

/// Ctrl-C while a request is in flight never reaches the console, so
/// leave from here.
fn install_interrupt_handler() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupted");
            println!("\n{GOODBYE}");
            std::process::exit(ExitCode::Success.as_i32());
        }
    });
}

fn report_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}
