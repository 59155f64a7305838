use bitflags::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Manhattan distance.
    pub fn distance_to(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn translate(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();

        Position::new(self.x + dx, self.y + dy)
    }

    /// Cardinal directions that reduce the distance to the target. Empty when already there,
    /// one direction when aligned on an axis, two when diagonal.
    pub fn directions_to(&self, target: Position) -> DirectionSet {
        let mut directions = DirectionSet::empty();

        if target.y < self.y {
            directions.insert(DirectionSet::NORTH);
        }

        if target.y > self.y {
            directions.insert(DirectionSet::SOUTH);
        }

        if target.x > self.x {
            directions.insert(DirectionSet::EAST);
        }

        if target.x < self.x {
            directions.insert(DirectionSet::WEST);
        }

        directions
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Position {
        Position::new(x, y)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Offset on the grid. North decreases y.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn as_flag(&self) -> DirectionSet {
        match self {
            Direction::North => DirectionSet::NORTH,
            Direction::East => DirectionSet::EAST,
            Direction::South => DirectionSet::SOUTH,
            Direction::West => DirectionSet::WEST,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "n"),
            Direction::East => write!(f, "e"),
            Direction::South => write!(f, "s"),
            Direction::West => write!(f, "w"),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DirectionSet: u8 {
        const NORTH = 1;
        const EAST = 1 << 1;
        const SOUTH = 1 << 2;
        const WEST = 1 << 3;
    }
}

impl DirectionSet {
    /// Member directions in north, east, south, west order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |direction| self.contains(direction.as_flag()))
    }

    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }
}
