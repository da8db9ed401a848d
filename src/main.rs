use std::fs::File;
use std::process::ExitCode;

use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use termsnake::term::TermManager;
use termsnake::{Game, Result, Settings};

const LOG_FILE: &str = "termsnake.log";

fn main() -> ExitCode {
    // The terminal is the game screen, so logs go to a file.
    if let Err(e) = init_logging() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => {
            info!("exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("fatal error: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join(LOG_FILE);
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(path)?)?;
    Ok(())
}

fn run() -> Result<()> {
    let settings = Settings::default();
    settings.validate()?;

    // The main game loop takes care of restoring the terminal on the way out
    let mut game = Game::new(TermManager::new(), &settings);
    game.run()
}
