//! Main application entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use finboard_app::{App, AppConfig, Command};

#[derive(Parser, Debug)]
#[command(name = "finboard", about = "Inspect and maintain a saved Finboard whiteboard")]
struct Cli {
    /// Directory holding saved boards.
    #[arg(long, env = "FINBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key of the board (letters, digits, `-` and `_`).
    #[arg(long, env = "FINBOARD_BOARD", default_value = finboard_core::STORAGE_KEY)]
    board: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting Finboard with {:?}", cli);

    let config = AppConfig {
        storage_dir: cli.data_dir,
        storage_key: cli.board,
        ..AppConfig::default()
    };

    let result = App::open(config).and_then(|mut app| {
        let output = app.run(cli.command)?;
        app.close()?;
        Ok(output)
    });

    match result {
        Ok(output) => {
            print!("{}", output);
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
