//! Screen placement of grid cells.
//!
//! Cells are laid out column by column with a fixed gap (the divider) between
//! them, starting at an origin that leaves room for the action bar.

use crate::cell::Coord;
use crate::config::LayoutConfig;

/// Axis-aligned cell rectangle in pixels, half-open on the right and bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CellRect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub cell_width: f32,
    pub cell_height: f32,
    pub divider: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl CellLayout {
    fn pitch_x(&self) -> f32 {
        self.cell_width + self.divider
    }

    fn pitch_y(&self) -> f32 {
        self.cell_height + self.divider
    }

    pub fn bounds(&self, coord: Coord) -> CellRect {
        CellRect {
            x: self.origin_x + coord.x as f32 * self.pitch_x(),
            y: self.origin_y + coord.y as f32 * self.pitch_y(),
            w: self.cell_width,
            h: self.cell_height,
        }
    }

    /// Map a pixel back to the cell drawn under it.
    /// Pixels on a divider or outside the grid map to nothing.
    pub fn locate(&self, px: f32, py: f32, cols: i32, rows: i32) -> Option<Coord> {
        if self.pitch_x() <= 0.0 || self.pitch_y() <= 0.0 {
            return None;
        }
        let rel_x = px - self.origin_x;
        let rel_y = py - self.origin_y;
        if rel_x < 0.0 || rel_y < 0.0 {
            return None;
        }

        let gx = (rel_x / self.pitch_x()).floor() as i32;
        let gy = (rel_y / self.pitch_y()).floor() as i32;
        if gx >= cols || gy >= rows {
            return None;
        }

        let coord = Coord::new(gx, gy);
        if self.bounds(coord).contains(px, py) {
            Some(coord)
        } else {
            None
        }
    }

    /// Total pixel size of a cols x rows grid, origin included
    pub fn canvas_size(&self, cols: i32, rows: i32) -> (f32, f32) {
        (
            self.origin_x + cols as f32 * self.pitch_x(),
            self.origin_y + rows as f32 * self.pitch_y(),
        )
    }
}

impl From<&LayoutConfig> for CellLayout {
    fn from(config: &LayoutConfig) -> Self {
        CellLayout {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            divider: config.divider,
            origin_x: config.origin_x,
            origin_y: config.origin_y,
        }
    }
}
