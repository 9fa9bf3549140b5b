use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::prelude::*;
use pathgrid::config::VisualConfig;
use pathgrid::level_file::to_ascii;
use pathgrid::{Config, Coord, DisplayState, EditOutcome, Grid, LevelData, LevelError};
use std::error::Error;

/// Load the configured level, falling back to an empty grid if the file is missing
fn load_grid(config: &Config) -> Result<Grid, LevelError> {
    match LevelData::load_json(&config.level.path) {
        Ok(level) => Grid::from_level(config, &level),
        Err(LevelError::Io(e)) => {
            warn!("{}, starting from an empty grid", e);
            Grid::blank(&config.grid, &config.layout)
        }
        Err(e) => Err(e),
    }
}

/// Headless check: build the level and report its shape
fn run_check(config: &Config, path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let path = path.unwrap_or(&config.level.path);
    let level = LevelData::load_json(path)?;
    let grid = Grid::from_level(config, &level)?;

    info!(
        "{}: {}x{} cells, {} walls, {} edges, start {} ({} exits), destination {} ({} exits)",
        path,
        grid.cols(),
        grid.rows(),
        grid.wall_count(),
        grid.edge_count(),
        grid.start(),
        grid.start().neighbor_count(),
        grid.destination(),
        grid.destination().neighbor_count(),
    );
    Ok(())
}

fn to_color(rgb: [u8; 3]) -> Color {
    Color::from_rgba(rgb[0], rgb[1], rgb[2], 255)
}

fn state_color(visual: &VisualConfig, state: DisplayState) -> Color {
    match state {
        DisplayState::Wall => to_color(visual.wall),
        DisplayState::Destination => to_color(visual.destination),
        DisplayState::Start => to_color(visual.start),
        DisplayState::Explored => to_color(visual.explored),
        DisplayState::Preview => to_color(visual.preview),
        DisplayState::Empty => to_color(visual.empty),
    }
}

/// Interactive editor state
struct EditorState {
    config: Config,
    grid: Grid,
    hovered: Option<Coord>,
    status: String,
    /// Held for the editor's lifetime so copied text stays available
    clipboard: Option<Clipboard>,
}

impl EditorState {
    fn new(config: Config, grid: Grid) -> Self {
        EditorState {
            config,
            grid,
            hovered: None,
            status: String::new(),
            clipboard: None,
        }
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.hovered = None;
    }

    /// Preview the adjacency of the cell under the cursor
    fn update_hover(&mut self, mouse_x: f32, mouse_y: f32) {
        let hovered = self.grid.locate(mouse_x, mouse_y);
        if hovered == self.hovered {
            return;
        }
        self.grid.clear_preview();
        if let Some(coord) = hovered {
            for (neighbor, _) in self.grid.neighbors(coord) {
                // start and destination refuse the mark and keep their own color
                let _ = self.grid.set_preview(neighbor, true);
            }
        }
        self.hovered = hovered;
    }

    fn handle_mouse(&mut self) {
        let Some(coord) = self.hovered else {
            return;
        };

        // Left held: paint walls
        if is_mouse_button_down(MouseButton::Left) {
            if self.grid.set_wall(coord) == EditOutcome::Applied {
                self.hovered = None;
            }
        }
        // Right held: erase walls
        else if is_mouse_button_down(MouseButton::Right)
            && self.grid.clear_wall(coord) == EditOutcome::Applied
        {
            self.hovered = None;
        }
    }

    fn toggle_explored(&mut self) {
        if let Some(coord) = self.hovered {
            let explored = self.grid.cell(coord).is_some_and(|c| c.is_explored());
            if self.grid.set_explored(coord, !explored) == EditOutcome::Rejected {
                self.status = format!("{} cannot be marked explored", coord);
            }
        }
    }

    fn reload_level(&mut self) {
        match load_grid(&self.config) {
            Ok(grid) => {
                self.replace_grid(grid);
                self.status = format!("Reloaded {}", self.config.level.path);
            }
            Err(e) => {
                error!("Failed to reload level: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard, arboard::Error> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        Ok(self.clipboard.insert(clipboard))
    }

    fn copy_to_clipboard(&mut self) {
        let layout = to_ascii(&self.grid);
        match self.clipboard().and_then(|clipboard| clipboard.set_text(layout)) {
            Ok(()) => self.status = "Layout copied to clipboard".to_string(),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match self.clipboard().and_then(|clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read clipboard: {}", e);
                return;
            }
        };

        match LevelData::parse_ascii(&text).and_then(|level| Grid::from_level(&self.config, &level)) {
            Ok(grid) => {
                self.replace_grid(grid);
                self.status = "Layout pasted from clipboard".to_string();
            }
            Err(e) => {
                warn!("Rejected pasted layout: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::X) {
            self.toggle_explored();
        }
        if is_key_pressed(KeyCode::C) {
            self.grid.clear_walls();
            self.hovered = None;
            self.status = "Walls cleared".to_string();
        }
        if is_key_pressed(KeyCode::E) {
            self.grid.clear_explored();
            // previews went with the explored marks; re-apply on the next hover update
            self.hovered = None;
            self.status = "Explored cells cleared".to_string();
        }
        if is_key_pressed(KeyCode::K) {
            self.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            self.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::L) {
            self.reload_level();
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(to_color(visual.background));

        for cell in self.grid.cells() {
            if let Some(rect) = self.grid.cell_bounds(cell.coord()) {
                let color = state_color(visual, cell.display_state());
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
            }
        }

        let hovered = match self.hovered.and_then(|c| self.grid.cell(c)) {
            Some(cell) => format!("{} ({} exits)", cell, cell.neighbor_count()),
            None => "-".to_string(),
        };
        let info = format!(
            "Cell: {}  Walls: {}  {}",
            hovered,
            self.grid.wall_count(),
            self.status
        );
        draw_text(&info, 6.0, 16.0, 18.0, WHITE);
        draw_text(
            "LMB wall  RMB erase  X explore  C clear  E clear explored  K copy  V paste  L reload",
            6.0,
            34.0,
            16.0,
            GRAY,
        );
    }
}

async fn run_editor(config: Config, grid: Grid) {
    let mut state = EditorState::new(config, grid);

    loop {
        let (mouse_x, mouse_y) = mouse_position();
        state.update_hover(mouse_x, mouse_y);
        state.handle_mouse();
        state.handle_keys();

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--check" {
        return run_check(&config, args.get(2).map(String::as_str));
    }

    let grid = load_grid(&config)?;
    let (width, height) = grid.layout().canvas_size(grid.cols(), grid.rows());
    let window = Conf {
        window_title: config.visual.window_title.clone(),
        window_width: width.ceil() as i32,
        window_height: height.ceil() as i32,
        window_resizable: false,
        ..Default::default()
    };

    info!("Opening editor for {}", config.level.path);
    macroquad::Window::from_config(window, run_editor(config, grid));
    Ok(())
}
