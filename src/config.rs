use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in tiles.
pub const DEFAULT_GRID_WIDTH: u16 = 24;

/// Default board height in tiles.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Interval between simulation ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Every n-th primary food eaten spawns a bonus food.
pub const DEFAULT_BONUS_INTERVAL: u32 = 5;

/// How long the celebration banner stays up after bonus food is eaten.
pub const DEFAULT_CELEBRATION_MS: u64 = 2_000;

/// Head cell at the start of every game.
pub const DEFAULT_START: Position = Position { x: 5, y: 5 };

/// Three short wall segments placed on every default board.
pub const DEFAULT_WALLS: [Position; 12] = [
    Position { x: 10, y: 10 },
    Position { x: 10, y: 11 },
    Position { x: 10, y: 12 },
    Position { x: 10, y: 13 },
    Position { x: 15, y: 5 },
    Position { x: 15, y: 6 },
    Position { x: 15, y: 7 },
    Position { x: 15, y: 8 },
    Position { x: 20, y: 15 },
    Position { x: 21, y: 15 },
    Position { x: 22, y: 15 },
    Position { x: 23, y: 15 },
];

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when either axis has no tiles.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where freshly placed food is allowed to land.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Any tile on the board, including walls, the snake and the other food.
    #[default]
    Anywhere,
    /// Only tiles not covered by walls, the snake or the other food item.
    /// Falls back to [`SpawnPolicy::Anywhere`] when the board is full.
    AvoidOccupied,
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid must be at least 1x1 tiles, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("start cell ({x}, {y}) lies outside the grid")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("bonus interval must be positive")]
    ZeroBonusInterval,
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

/// Construction-time settings for one game session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub walls: Vec<Position>,
    pub start: Position,
    pub start_direction: Direction,
    pub spawn_policy: SpawnPolicy,
    pub bonus_interval: u32,
    pub celebration_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            walls: DEFAULT_WALLS.to_vec(),
            start: DEFAULT_START,
            start_direction: Direction::Right,
            spawn_policy: SpawnPolicy::Anywhere,
            bonus_interval: DEFAULT_BONUS_INTERVAL,
            celebration_ms: DEFAULT_CELEBRATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Creates an otherwise-default config for a board of the given size.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Parses a config from JSON text. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Loads a config file from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config file in the platform config directory.
    ///
    /// Returns the defaults when no such file exists.
    pub fn load_default_location() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Checks the invariants the engine relies on.
    ///
    /// Walls outside the grid are unreachable but harmless, so they are only
    /// reported through the log.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid();
        if grid.is_empty() {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        if !self.start.is_within_bounds(grid) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
            });
        }

        if self.bonus_interval == 0 {
            return Err(ConfigError::ZeroBonusInterval);
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        for wall in self.walls.iter().filter(|w| !w.is_within_bounds(grid)) {
            tracing::warn!(x = wall.x, y = wall.y, "wall lies outside the grid");
        }

        Ok(())
    }
}

/// Returns the platform-correct config file path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub bonus_food: Color,
    pub wall: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub game_over: Color,
    pub celebration: Color,
    pub menu_title: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    bonus_food: Color::Blue,
    wall: Color::Gray,
    play_bg: Color::Black,
    border_fg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    game_over: Color::Red,
    celebration: Color::Yellow,
    menu_title: Color::Green,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each tile is drawn two terminal columns wide so cells look square.
pub const TILE_COLUMNS: u16 = 2;

pub const GLYPH_TILE: &str = "██";
pub const GLYPH_FOOD: &str = "●●";
pub const GLYPH_BONUS_FOOD: &str = "◆◆";
pub const GLYPH_WALL: &str = "▓▓";
