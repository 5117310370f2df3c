use std::process::ExitCode;

use image_manager::shell;
use image_manager::utils::io::Console;
use image_manager::utils::logging::initialize_logging;
use image_manager::AppConfig;

fn main() -> ExitCode {
    // Exits with clap's usage message on bad flags
    let config = AppConfig::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    if let Err(e) = initialize_logging(&config.log_file, config.log_level()) {
        eprintln!(
            "Warning: could not open log file {}: {}",
            config.log_file.display(),
            e
        );
    }
    log::info!("Using data file {}", config.data_file.display());

    let mut console = Console::stdio();
    match shell::run(&mut console, &config.data_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
