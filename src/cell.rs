use std::collections::HashMap;
use std::fmt;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a renderer should draw for a cell.
///
/// Exactly one state applies at a time, picked by flag precedence:
/// wall > destination > start > explored > preview > empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    Wall,
    Destination,
    Start,
    Explored,
    Preview,
    Empty,
}

/// One node of the grid graph
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    x: i32,
    y: i32,
    is_wall: bool,
    is_start: bool,
    is_destination: bool,
    is_explored: bool,
    is_preview: bool,
    /// Outgoing edges, keyed by neighbor coordinate
    neighbors: HashMap<Coord, f64>,
}

impl Cell {
    pub fn new(x: i32, y: i32, is_wall: bool) -> Self {
        Cell {
            x,
            y,
            is_wall,
            is_start: false,
            is_destination: false,
            is_explored: false,
            is_preview: false,
            neighbors: HashMap::new(),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_destination(&self) -> bool {
        self.is_destination
    }

    pub fn is_explored(&self) -> bool {
        self.is_explored
    }

    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    /// Start, destination and wall cells never show transient search state
    fn has_fixed_role(&self) -> bool {
        self.is_start || self.is_destination || self.is_wall
    }

    /// Link `other` with the given weight.
    /// Returns false (and does nothing) if `other` is a wall, is this cell,
    /// or is already linked.
    pub fn add_neighbor(&mut self, other: &Cell, weight: f64) -> bool {
        let key = other.coord();
        if other.is_wall || key == self.coord() || self.neighbors.contains_key(&key) {
            return false;
        }
        self.neighbors.insert(key, weight);
        true
    }

    pub fn remove_neighbor(&mut self, coord: Coord) -> bool {
        self.neighbors.remove(&coord).is_some()
    }

    pub(crate) fn clear_neighbors(&mut self) {
        self.neighbors.clear();
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (Coord, f64)> + '_ {
        self.neighbors.iter().map(|(&coord, &weight)| (coord, weight))
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn has_neighbor(&self, coord: Coord) -> bool {
        self.neighbors.contains_key(&coord)
    }

    pub fn weight_to(&self, coord: Coord) -> Option<f64> {
        self.neighbors.get(&coord).copied()
    }

    /// Turning a cell into a wall drops all of its edges. Turning it back does
    /// not restore them; the grid re-links it.
    pub fn set_wall(&mut self, value: bool) -> bool {
        if self.is_wall == value {
            return false;
        }
        if value {
            self.neighbors.clear();
            self.is_explored = false;
            self.is_preview = false;
        }
        self.is_wall = value;
        true
    }

    pub fn set_start(&mut self, value: bool) -> bool {
        if self.is_start == value {
            return false;
        }
        self.is_start = value;
        true
    }

    pub fn set_destination(&mut self, value: bool) -> bool {
        if self.is_destination == value {
            return false;
        }
        self.is_destination = value;
        true
    }

    pub fn set_explored(&mut self, value: bool) -> bool {
        if self.has_fixed_role() || self.is_explored == value {
            return false;
        }
        self.is_explored = value;
        true
    }

    pub fn set_preview(&mut self, value: bool) -> bool {
        if self.has_fixed_role() || self.is_preview == value {
            return false;
        }
        self.is_preview = value;
        true
    }

    pub fn display_state(&self) -> DisplayState {
        if self.is_wall {
            DisplayState::Wall
        } else if self.is_destination {
            DisplayState::Destination
        } else if self.is_start {
            DisplayState::Start
        } else if self.is_explored {
            DisplayState::Explored
        } else if self.is_preview {
            DisplayState::Preview
        } else {
            DisplayState::Empty
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_neighbor_skips_walls_and_duplicates() {
        let mut cell = Cell::new(1, 1, false);
        let open = Cell::new(1, 2, false);
        let wall = Cell::new(2, 2, true);

        assert!(cell.add_neighbor(&open, 1.0));
        assert!(!cell.add_neighbor(&open, 5.0));
        assert!(!cell.add_neighbor(&wall, 1.0));

        assert_eq!(cell.neighbor_count(), 1);
        assert_eq!(cell.weight_to(Coord::new(1, 2)), Some(1.0));
    }

    #[test]
    fn add_neighbor_ignores_self() {
        let mut cell = Cell::new(0, 0, false);
        let same = cell.clone();
        assert!(!cell.add_neighbor(&same, 1.0));
        assert_eq!(cell.neighbor_count(), 0);
    }

    #[test]
    fn walling_clears_edges_and_transient_state() {
        let mut cell = Cell::new(0, 0, false);
        cell.add_neighbor(&Cell::new(1, 0, false), 1.0);
        cell.set_explored(true);

        assert!(cell.set_wall(true));
        assert_eq!(cell.neighbor_count(), 0);
        assert!(!cell.is_explored());

        // Un-walling leaves neighbor restoration to the grid
        assert!(cell.set_wall(false));
        assert_eq!(cell.neighbor_count(), 0);
        assert!(!cell.set_wall(false));
    }

    #[test]
    fn explored_and_preview_skip_fixed_roles() {
        let mut start = Cell::new(0, 0, false);
        start.set_start(true);
        assert!(!start.set_explored(true));
        assert!(!start.set_preview(true));

        let mut wall = Cell::new(1, 0, true);
        assert!(!wall.set_explored(true));

        let mut plain = Cell::new(2, 0, false);
        assert!(plain.set_preview(true));
        assert!(!plain.set_preview(true));
        assert!(plain.set_explored(true));
        assert!(plain.is_explored() && plain.is_preview());
    }

    #[test]
    fn display_state_follows_flag_precedence() {
        let mut cell = Cell::new(0, 0, false);
        assert_eq!(cell.display_state(), DisplayState::Empty);

        cell.set_preview(true);
        assert_eq!(cell.display_state(), DisplayState::Preview);

        cell.set_explored(true);
        assert_eq!(cell.display_state(), DisplayState::Explored);

        cell.set_start(true);
        assert_eq!(cell.display_state(), DisplayState::Start);

        cell.set_destination(true);
        assert_eq!(cell.display_state(), DisplayState::Destination);

        cell.set_wall(true);
        assert_eq!(cell.display_state(), DisplayState::Wall);
    }

    #[test]
    fn destination_flag_can_be_cleared() {
        let mut cell = Cell::new(4, 4, false);
        assert!(cell.set_destination(true));
        assert!(!cell.set_destination(true));
        assert!(cell.set_destination(false));
        assert!(!cell.is_destination());
    }

    #[test]
    fn coord_display_matches_tuple_form() {
        assert_eq!(Coord::new(3, 4).to_string(), "(3, 4)");
        assert_eq!(Cell::new(20, 20, false).to_string(), "(20, 20)");
    }
}
