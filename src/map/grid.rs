use super::position::*;
use serde::{Deserialize, Serialize};

/// Neighbourhood used when walking the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

const FOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

const EIGHT_OFFSETS: [(i32, i32); 8] = [(0, -1), (1, 0), (0, 1), (-1, 0), (1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Bounds checked addressing over a fixed size grid. Out of bounds lookups are caller bugs and
/// panic rather than clamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridIndex {
    width: u32,
    height: u32,
}

impl GridIndex {
    pub fn new(width: u32, height: u32) -> GridIndex {
        GridIndex { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn index_of(&self, pos: Position) -> usize {
        assert!(self.in_bounds(pos), "position {} outside {}x{} grid", pos, self.width, self.height);

        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn position_of(&self, index: usize) -> Position {
        assert!(index < self.len(), "index {} outside {}x{} grid", index, self.width, self.height);

        let width = self.width as usize;

        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;

        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn neighbours_four(&self, pos: Position) -> impl Iterator<Item = Position> {
        self.neighbours_from(pos, &FOUR_OFFSETS)
    }

    pub fn neighbours_eight(&self, pos: Position) -> impl Iterator<Item = Position> {
        self.neighbours_from(pos, &EIGHT_OFFSETS)
    }

    pub fn neighbours(&self, pos: Position, connectivity: Connectivity) -> impl Iterator<Item = Position> {
        let offsets: &'static [(i32, i32)] = match connectivity {
            Connectivity::Four => &FOUR_OFFSETS,
            Connectivity::Eight => &EIGHT_OFFSETS,
        };

        self.neighbours_from(pos, offsets)
    }

    fn neighbours_from(&self, pos: Position, offsets: &'static [(i32, i32)]) -> impl Iterator<Item = Position> {
        assert!(self.in_bounds(pos), "position {} outside {}x{} grid", pos, self.width, self.height);

        let grid = *self;

        offsets
            .iter()
            .map(move |(dx, dy)| Position::new(pos.x + dx, pos.y + dy))
            .filter(move |neighbour| grid.in_bounds(*neighbour))
    }
}
