//! Game configuration
//!
//! Loaded from, lowest to highest priority:
//! 1. built-in defaults
//! 2. `config/default.toml`
//! 3. `config/user.toml`
//! 4. environment variables (`SNAKE_SECTION__KEY`)

use std::path::Path;

use crossterm::style::Color;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
    #[serde(default)]
    pub food: FoodConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub hud: HudConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(GameConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SNAKE_BOARD__WIDTH=320 -> board.width = 320
        figment = figment.merge(Env::prefixed("SNAKE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Drawing surface and grid geometry, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { width: 640, height: 480, cell_width: 10, cell_height: 10 }
    }
}

impl BoardConfig {
    /// Number of whole cells that fit horizontally and vertically
    pub fn grid_size(&self) -> (u32, u32) {
        (self.width / self.cell_width.max(1), self.height / self.cell_height.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub initial_length: u32,
    /// Magnitude of the speed vector latched alongside each direction
    pub speed: i32,
    pub color: String,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self { initial_length: 3, speed: 3, color: "#39FF14".to_string() }
    }
}

/// Where the first food cell sits, and how every food cell looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodConfig {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self { x: 1, y: 1, color: "#39FF14".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub ticks_per_second: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { ticks_per_second: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudConfig {
    pub show_fps: bool,
    pub text_color: String,
    pub game_over_color: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            text_color: "#FFFFFF".to_string(),
            game_over_color: "#FF0000".to_string(),
        }
    }
}

/// The screen belongs to the game, so log records go to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Empty disables logging
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: "snake.log".to_string() }
    }
}

/// Parse a `#RRGGBB` color string.
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::new(format!("invalid color '{}', expected #RRGGBB", value)));
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16)
        .map_err(|e| ConfigError::new(format!("invalid color '{}': {}", value, e)));

    Ok(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        ConfigError { message: message.into() }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError { message: e.to_string() }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
