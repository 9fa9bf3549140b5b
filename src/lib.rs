pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod level_file;

pub use cell::{Cell, Coord, DisplayState};
pub use config::Config;
pub use error::LevelError;
pub use grid::{EditOutcome, Grid};
pub use level_file::LevelData;
