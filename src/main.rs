use std::fs::File;
use std::process::exit;

use canvas_snake::config::{GameConfig, LoggingConfig};
use canvas_snake::game::{Outcome, SnakeGame};
use canvas_snake::input::{is_ctrl_c, KeySource};
use canvas_snake::term::{TermKeys, TermSurface};
use canvas_snake::Result;

fn main() {
    let (config, config_err) = match GameConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Could not open log file '{}': {}", config.logging.file, e);
    }
    if let Some(e) = config_err {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    // The terminal is restored when the surface drops inside run(), before this prints
    if let Err(e) = run(&config) {
        log::error!("{}", e);
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(config: &GameConfig) -> Result<()> {
    // Validate before touching the terminal
    let mut game = SnakeGame::new(config)?;
    let mut surface = TermSurface::new(&config.board)?;
    let mut keys = TermKeys;

    loop {
        match game.play(&mut surface, &mut keys)? {
            Outcome::Quit { .. } => return Ok(()),
            Outcome::GameOver { score, .. } => {
                log::info!("final score {}", score);
                // Quit if the user CTRL+C's after the game, otherwise start over
                if is_ctrl_c(&keys.wait_key()?) {
                    return Ok(());
                }
                game = SnakeGame::new(config)?;
            }
        }
    }
}

fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
    if config.file.is_empty() {
        return Ok(());
    }

    let file = File::create(&config.file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.level.as_str()))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();
    Ok(())
}
