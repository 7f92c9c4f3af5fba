use super::config::MapSize;
use super::state::Position;

/// Playing field dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn from_map_size(map_size: MapSize) -> Self {
        let (width, height) = map_size.dimensions();
        Self::new(width, height)
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}
