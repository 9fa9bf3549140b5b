#![allow(dead_code)]

use pathgrid::config::{GridConfig, LayoutConfig};
use pathgrid::{Coord, Grid, LevelData};
use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;

pub const EPSILON: f64 = 1e-9;

pub fn grid_config(cols: i32, rows: i32, start: (i32, i32), destination: (i32, i32)) -> GridConfig {
    GridConfig {
        cols,
        rows,
        start_x: start.0,
        start_y: start.1,
        destination_x: destination.0,
        destination_y: destination.1,
    }
}

/// Empty grid with start in the top-left and destination in the bottom-right
pub fn blank(cols: i32, rows: i32) -> Grid {
    Grid::blank(&grid_config(cols, rows, (0, 0), (cols - 1, rows - 1)), &LayoutConfig::default())
        .expect("blank grid")
}

/// Build a grid from the text layout format (■ wall, □ free)
pub fn from_ascii(text: &str, start: (i32, i32), destination: (i32, i32)) -> Grid {
    let level = LevelData::parse_ascii(text).expect("valid layout");
    let config = grid_config(level.cols() as i32, level.rows() as i32, start, destination);
    Grid::new(&config, &LayoutConfig::default(), &level.walls).expect("valid grid")
}

/// Every cell's outgoing edges, ordered for comparison
pub fn adjacency(grid: &Grid) -> BTreeMap<Coord, BTreeMap<Coord, f64>> {
    grid.cells()
        .map(|cell| (cell.coord(), cell.neighbors().collect()))
        .collect()
}

pub fn expected_weight(a: Coord, b: Coord) -> Option<f64> {
    match ((a.x - b.x).abs(), (a.y - b.y).abs()) {
        (0, 1) | (1, 0) => Some(1.0),
        (1, 1) => Some(SQRT_2),
        _ => None,
    }
}

/// Walls have no edges, nothing links to a wall, every edge is mirrored,
/// and every non-wall pair of touching cells is linked with the right weight.
pub fn assert_graph_invariants(grid: &Grid) {
    for cell in grid.cells() {
        let here = cell.coord();
        if cell.is_wall() {
            assert_eq!(cell.neighbor_count(), 0, "wall {} has edges", here);
            continue;
        }

        for (there, weight) in cell.neighbors() {
            let other = grid.cell(there).expect("neighbor in bounds");
            assert!(!other.is_wall(), "{} links to wall {}", here, there);
            let expected = expected_weight(here, there)
                .unwrap_or_else(|| panic!("{} links to non-adjacent {}", here, there));
            assert!((weight - expected).abs() < EPSILON, "{} -> {} weight {}", here, there, weight);
            assert_eq!(other.weight_to(here), Some(weight), "edge {} -> {} not mirrored", here, there);
        }

        for dx in -1..=1 {
            for dy in -1..=1 {
                let there = Coord::new(here.x + dx, here.y + dy);
                if there == here {
                    continue;
                }
                if let Some(other) = grid.cell(there) {
                    assert_eq!(
                        cell.has_neighbor(there),
                        !other.is_wall(),
                        "link {} -> {} out of sync with wall state",
                        here,
                        there
                    );
                }
            }
        }
    }
}
