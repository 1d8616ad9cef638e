use std::fmt;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, GameError>;

/// Everything that can stop the game from running. Losing is not in here,
/// that is an ordinary [`MoveResult::Crashed`](crate::snake::MoveResult).
#[derive(Debug)]
pub enum GameError {
    /// Configuration could not be loaded or holds a malformed value
    Config(ConfigError),
    /// Reading from or writing to the terminal failed
    Terminal(crossterm::ErrorKind),
    /// A board or cell dimension is zero
    InvalidDimensions { width: u32, height: u32, cell_width: u32, cell_height: u32 },
    /// The grid cannot hold the initial snake or a food spawn range
    BoardTooSmall { columns: u32, rows: u32, initial_length: u32 },
    /// The terminal cannot show the whole board
    TerminalTooSmall { needed: (u16, u16), available: (u16, u16) },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config(err) => write!(f, "{}", err),
            GameError::Terminal(err) => write!(f, "Terminal error: {}", err),
            GameError::InvalidDimensions { width, height, cell_width, cell_height } => write!(
                f,
                "Invalid dimensions: board {}x{} px, cells {}x{} px (each must be between 1 and 2147483647)",
                width, height, cell_width, cell_height
            ),
            GameError::BoardTooSmall { columns, rows, initial_length } => write!(
                f,
                "Board of {}x{} cells is too small for a snake of length {}",
                columns, rows, initial_length
            ),
            GameError::TerminalTooSmall { needed, available } => write!(
                f,
                "Terminal too small: need {}x{}, have {}x{}",
                needed.0, needed.1, available.0, available.1
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(err) => Some(err),
            GameError::Terminal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl From<crossterm::ErrorKind> for GameError {
    fn from(err: crossterm::ErrorKind) -> Self {
        GameError::Terminal(err)
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Terminal(crossterm::ErrorKind::IoError(err))
    }
}
