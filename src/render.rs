// Painting the game onto a pixel surface.
// Every redraw is a full snapshot: the surface is cleared, then every snake
// cell and the food cell are filled as CELL_SIZE squares.

use crate::config::{BACKGROUND_COLOR, CANVAS_SIZE, CELL_SIZE, FOOD_COLOR, SNAKE_COLOR};
use crate::coordinates::Coordinates;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Something the renderer can paint on.
pub trait Surface {
    fn clear(&mut self);
    /// Fill a rectangle; parts outside the surface are clipped.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb);
}

/// In-memory RGB canvas, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        PixelCanvas {
            width,
            height,
            pixels: vec![BACKGROUND_COLOR; (width * height) as usize],
        }
    }

    /// The square board canvas, `GRID_SIZE * CELL_SIZE` pixels wide.
    pub fn board() -> Self {
        Self::new(CANVAS_SIZE, CANVAS_SIZE)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

impl Surface for PixelCanvas {
    fn clear(&mut self) {
        self.pixels.fill(BACKGROUND_COLOR);
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = (row * self.width + x.min(x_end)) as usize;
            let end = (row * self.width + x_end) as usize;
            self.pixels[start..end].fill(color);
        }
    }
}

fn fill_cell(surface: &mut dyn Surface, cell: &Coordinates, color: Rgb) {
    // coordinates are kept inside the board, never negative
    let x = cell.x.max(0) as u32 * CELL_SIZE;
    let y = cell.y.max(0) as u32 * CELL_SIZE;
    surface.fill_rect(x, y, CELL_SIZE, CELL_SIZE, color);
}

/// Redraw the snapshot of `state`. Without a surface there is nothing to do.
pub fn draw(state: &GameState, surface: Option<&mut dyn Surface>) {
    let Some(surface) = surface else {
        return;
    };
    surface.clear();
    for segment in &state.snake {
        fill_cell(surface, segment, SNAKE_COLOR);
    }
    fill_cell(surface, &state.food, FOOD_COLOR);
}
