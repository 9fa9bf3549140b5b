use crate::cell::{Cell, Coord};
use crate::config::{Config, GridConfig, LayoutConfig};
use crate::error::LevelError;
use crate::layout::{CellLayout, CellRect};
use crate::level_file::LevelData;
use log::{debug, info, warn};
use std::f64::consts::SQRT_2;

pub const ORTHOGONAL_WEIGHT: f64 = 1.0;
pub const DIAGONAL_WEIGHT: f64 = SQRT_2;

/// The 8 surrounding offsets with their edge weights
const NEIGHBOR_OFFSETS: [(i32, i32, f64); 8] = [
    (-1, 0, ORTHOGONAL_WEIGHT),
    (1, 0, ORTHOGONAL_WEIGHT),
    (0, -1, ORTHOGONAL_WEIGHT),
    (0, 1, ORTHOGONAL_WEIGHT),
    (-1, -1, DIAGONAL_WEIGHT),
    (-1, 1, DIAGONAL_WEIGHT),
    (1, -1, DIAGONAL_WEIGHT),
    (1, 1, DIAGONAL_WEIGHT),
];

/// Result of an edit request. A rejected edit left the grid untouched.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        self == EditOutcome::Applied
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            EditOutcome::Applied
        } else {
            EditOutcome::Rejected
        }
    }
}

/// Weighted grid graph with fixed start and destination cells.
///
/// Cells live in a flat arena indexed by `x + y * cols`; adjacency is stored
/// per cell as coordinate keys, so every edge appears once in each endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
    start: Coord,
    destination: Coord,
    layout: CellLayout,
    /// Incremented whenever an edit changes cell state
    revision: u64,
}

impl Grid {
    /// Build a grid from a column-major wall matrix (`walls[x][y]`, true = wall)
    pub fn new(
        grid: &GridConfig,
        layout: &LayoutConfig,
        walls: &[Vec<bool>],
    ) -> Result<Self, LevelError> {
        let (cols, rows) = (grid.cols, grid.rows);
        let malformed = |detail: String| LevelError::MalformedLevel {
            expected_cols: cols,
            expected_rows: rows,
            detail,
        };

        if cols <= 0 || rows <= 0 {
            return Err(malformed("grid dimensions must be positive".to_string()));
        }
        if walls.len() != cols as usize {
            return Err(malformed(format!("wall matrix has {} columns", walls.len())));
        }
        if let Some((x, column)) = walls
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != rows as usize)
        {
            return Err(malformed(format!("column {} has {} rows", x, column.len())));
        }

        let start = grid.start();
        let destination = grid.destination();
        let in_bounds = |c: Coord| c.x >= 0 && c.x < cols && c.y >= 0 && c.y < rows;
        if !in_bounds(start) {
            return Err(LevelError::InvalidCoordinate { what: "start", coord: start });
        }
        if !in_bounds(destination) {
            return Err(LevelError::InvalidCoordinate {
                what: "destination",
                coord: destination,
            });
        }
        if start == destination {
            return Err(LevelError::EndpointsCoincide(start));
        }

        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell::new(x, y, walls[x as usize][y as usize]));
            }
        }

        let mut level = Grid {
            cols,
            rows,
            cells,
            start,
            destination,
            layout: CellLayout::from(layout),
            revision: 0,
        };

        for (coord, role) in [(start, "start"), (destination, "destination")] {
            let cell = level.cell_mut(coord);
            if cell.set_wall(false) {
                warn!("Level has a wall under the {} cell {}, clearing it", role, coord);
            }
        }
        level.cell_mut(start).set_start(true);
        level.cell_mut(destination).set_destination(true);
        level.recompute_all_neighbors();

        info!(
            "Built {}x{} grid: {} walls, {} edges, start {} destination {}",
            cols,
            rows,
            level.wall_count(),
            level.edge_count(),
            start,
            destination
        );
        Ok(level)
    }

    /// Grid with no walls
    pub fn blank(grid: &GridConfig, layout: &LayoutConfig) -> Result<Self, LevelError> {
        let cols = grid.cols.max(0) as usize;
        let rows = grid.rows.max(0) as usize;
        Self::new(grid, layout, &vec![vec![false; rows]; cols])
    }

    pub fn from_level(config: &Config, level: &LevelData) -> Result<Self, LevelError> {
        Self::new(&config.grid, &config.layout, &level.walls)
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.cols && coord.y >= 0 && coord.y < self.rows
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.x + coord.y * self.cols) as usize
    }

    /// Caller guarantees `coord` is in bounds
    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let idx = self.index(coord);
        &mut self.cells[idx]
    }

    /// Mutable handle on `a` alongside a shared view of `b` (a != b)
    fn pair_mut(&mut self, a: Coord, b: Coord) -> (&mut Cell, &Cell) {
        let (ia, ib) = (self.index(a), self.index(b));
        if ia < ib {
            let (lo, hi) = self.cells.split_at_mut(ib);
            (&mut lo[ia], &hi[0])
        } else {
            let (lo, hi) = self.cells.split_at_mut(ia);
            (&mut hi[0], &lo[ib])
        }
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if self.contains(coord) {
            Some(&self.cells[self.index(coord)])
        } else {
            None
        }
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Result<&Cell, LevelError> {
        let coord = Coord::new(x, y);
        self.cell(coord).ok_or(LevelError::OutOfBounds(coord))
    }

    pub fn start(&self) -> &Cell {
        &self.cells[self.index(self.start)]
    }

    pub fn destination(&self) -> &Cell {
        &self.cells[self.index(self.destination)]
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Outgoing edges of a cell; empty for walls and out-of-bounds coordinates
    pub fn neighbors(&self, coord: Coord) -> Vec<(Coord, f64)> {
        self.cell(coord)
            .map(|cell| cell.neighbors().collect())
            .unwrap_or_default()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Number of undirected edges (each is stored in both endpoints)
    pub fn edge_count(&self) -> usize {
        self.cells.iter().map(Cell::neighbor_count).sum::<usize>() / 2
    }

    fn surrounding(&self, coord: Coord) -> impl Iterator<Item = (Coord, f64)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy, weight)| {
            let n = Coord::new(coord.x + dx, coord.y + dy);
            self.contains(n).then_some((n, weight))
        })
    }

    /// Link `coord` to every non-wall cell around it
    fn define_neighbors(&mut self, coord: Coord) {
        if self.cell_mut(coord).is_wall() {
            self.cell_mut(coord).clear_neighbors();
            return;
        }
        let around: Vec<(Coord, f64)> = self.surrounding(coord).collect();
        for (n, weight) in around {
            let (cell, other) = self.pair_mut(coord, n);
            cell.add_neighbor(other, weight);
        }
    }

    pub fn recompute_all_neighbors(&mut self) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let coord = Coord::new(x, y);
                self.cell_mut(coord).clear_neighbors();
                self.define_neighbors(coord);
            }
        }
    }

    /// Turn a cell into a wall and unlink it everywhere.
    /// Rejected for the start and destination cells, existing walls, and
    /// coordinates outside the grid.
    pub fn set_wall(&mut self, coord: Coord) -> EditOutcome {
        let Some(cell) = self.cell(coord) else {
            debug!("Wall at {} rejected: out of bounds", coord);
            return EditOutcome::Rejected;
        };
        if cell.is_start() || cell.is_destination() || cell.is_wall() {
            debug!("Wall at {} rejected", coord);
            return EditOutcome::Rejected;
        }

        self.cell_mut(coord).set_wall(true);
        for cell in self.cells.iter_mut() {
            cell.remove_neighbor(coord);
        }
        self.revision += 1;
        debug!("Wall placed at {}", coord);
        EditOutcome::Applied
    }

    /// Turn a wall back into an empty cell and re-link it with its
    /// surrounding non-wall cells.
    pub fn clear_wall(&mut self, coord: Coord) -> EditOutcome {
        if !self.cell(coord).is_some_and(Cell::is_wall) {
            debug!("Wall removal at {} rejected", coord);
            return EditOutcome::Rejected;
        }

        self.cell_mut(coord).set_wall(false);
        self.define_neighbors(coord);
        let around: Vec<(Coord, f64)> = self.surrounding(coord).collect();
        for (n, weight) in around {
            let (other, cell) = self.pair_mut(n, coord);
            if !other.is_wall() {
                other.add_neighbor(cell, weight);
            }
        }
        self.revision += 1;
        debug!("Wall removed at {}", coord);
        EditOutcome::Applied
    }

    pub fn toggle_wall(&mut self, coord: Coord) -> EditOutcome {
        if self.cell(coord).is_some_and(Cell::is_wall) {
            self.clear_wall(coord)
        } else {
            self.set_wall(coord)
        }
    }

    /// Remove every wall and all explored/preview marks, then rebuild adjacency
    pub fn clear_walls(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_wall(false);
            cell.set_explored(false);
            cell.set_preview(false);
        }
        self.recompute_all_neighbors();
        self.revision += 1;
        info!("Cleared all walls ({} edges)", self.edge_count());
    }

    /// Drop explored marks; preview marks go with them and must be re-applied
    pub fn clear_explored(&mut self) {
        let mut changed = false;
        for cell in self.cells.iter_mut() {
            changed |= cell.set_explored(false);
            changed |= cell.set_preview(false);
        }
        if changed {
            self.revision += 1;
        }
    }

    pub fn clear_preview(&mut self) {
        let mut changed = false;
        for cell in self.cells.iter_mut() {
            changed |= cell.set_preview(false);
        }
        if changed {
            self.revision += 1;
        }
    }

    pub fn set_explored(&mut self, coord: Coord, value: bool) -> EditOutcome {
        if !self.contains(coord) {
            return EditOutcome::Rejected;
        }
        let outcome = EditOutcome::from_changed(self.cell_mut(coord).set_explored(value));
        if outcome.is_applied() {
            self.revision += 1;
        }
        outcome
    }

    pub fn set_preview(&mut self, coord: Coord, value: bool) -> EditOutcome {
        if !self.contains(coord) {
            return EditOutcome::Rejected;
        }
        let outcome = EditOutcome::from_changed(self.cell_mut(coord).set_preview(value));
        if outcome.is_applied() {
            self.revision += 1;
        }
        outcome
    }

    /// Cell drawn under a pixel, if any
    pub fn locate(&self, px: f32, py: f32) -> Option<Coord> {
        self.layout.locate(px, py, self.cols, self.rows)
    }

    pub fn cell_bounds(&self, coord: Coord) -> Option<CellRect> {
        self.contains(coord).then(|| self.layout.bounds(coord))
    }
}
