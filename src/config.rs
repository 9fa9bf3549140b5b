use crate::cell::Coord;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub level: LevelFileConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

/// Grid dimensions and the two fixed endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_start_x")]
    pub start_x: i32,
    #[serde(default = "default_start_y")]
    pub start_y: i32,
    #[serde(default = "default_destination_x")]
    pub destination_x: i32,
    #[serde(default = "default_destination_y")]
    pub destination_y: i32,
}

/// Pixel layout of the cells on screen
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
    #[serde(default = "default_divider")]
    pub divider: f32,
    #[serde(default)]
    pub origin_x: f32,
    /// Room left above the grid for the action bar
    #[serde(default = "default_origin_y")]
    pub origin_y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelFileConfig {
    #[serde(default = "default_level_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_empty_color")]
    pub empty: [u8; 3],
    #[serde(default = "default_wall_color")]
    pub wall: [u8; 3],
    #[serde(default = "default_explored_color")]
    pub explored: [u8; 3],
    #[serde(default = "default_start_color")]
    pub start: [u8; 3],
    #[serde(default = "default_destination_color")]
    pub destination: [u8; 3],
    #[serde(default = "default_preview_color")]
    pub preview: [u8; 3],
}

// Default values
fn default_cols() -> i32 { 25 }
fn default_rows() -> i32 { 25 }
fn default_start_x() -> i32 { 3 }
fn default_start_y() -> i32 { 4 }
fn default_destination_x() -> i32 { 20 }
fn default_destination_y() -> i32 { 20 }
fn default_cell_width() -> f32 { 20.0 }
fn default_cell_height() -> f32 { 20.0 }
fn default_divider() -> f32 { 1.0 }
fn default_origin_y() -> f32 { 40.0 }
fn default_level_path() -> String { "levels/blank.json".to_string() }
fn default_window_title() -> String { "Pathgrid - Level Editor".to_string() }
fn default_background() -> [u8; 3] { [0, 0, 0] }
fn default_empty_color() -> [u8; 3] { [240, 240, 240] }
fn default_wall_color() -> [u8; 3] { [60, 60, 60] }
fn default_explored_color() -> [u8; 3] { [0, 0, 255] }
fn default_start_color() -> [u8; 3] { [0, 255, 0] }
fn default_destination_color() -> [u8; 3] { [255, 0, 0] }
fn default_preview_color() -> [u8; 3] { [173, 216, 230] }

impl GridConfig {
    pub fn start(&self) -> Coord {
        Coord::new(self.start_x, self.start_y)
    }

    pub fn destination(&self) -> Coord {
        Coord::new(self.destination_x, self.destination_y)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            start_x: default_start_x(),
            start_y: default_start_y(),
            destination_x: default_destination_x(),
            destination_y: default_destination_y(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            divider: default_divider(),
            origin_x: 0.0,
            origin_y: default_origin_y(),
        }
    }
}

impl Default for LevelFileConfig {
    fn default() -> Self {
        Self {
            path: default_level_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background: default_background(),
            empty: default_empty_color(),
            wall: default_wall_color(),
            explored: default_explored_color(),
            start: default_start_color(),
            destination: default_destination_color(),
            preview: default_preview_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            layout: LayoutConfig::default(),
            level: LevelFileConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
