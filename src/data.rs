use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Maps are indexed by u8 so anything larger can't be represented.
pub const MAX_SIZE: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance.
    pub fn dist(self, other: Pos) -> u32 {
        let dr = (i32::from(self.r) - i32::from(other.r)).abs();
        let dc = (i32::from(self.c) - i32::from(other.c)).abs();
        (dr + dc) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    North,
    South,
    East,
    West,
}

/// Canonical enumeration order - successor generation and everything else
/// that walks the four neighbors uses this order.
pub const DIRECTIONS: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

impl Dir {
    fn deltas(self) -> (i16, i16) {
        match self {
            Dir::North => (-1, 0),
            Dir::South => (1, 0),
            Dir::East => (0, 1),
            Dir::West => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::North => write!(f, "N"),
            Dir::South => write!(f, "S"),
            Dir::East => write!(f, "E"),
            Dir::West => write!(f, "W"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    // only valid on grids that enclose the agent - the parser checks the border
    // so walking off the map can't happen during search
    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.deltas();
        Pos {
            r: (i16::from(self.r) + dr) as u8,
            c: (i16::from(self.c) + dc) as u8,
        }
    }
}

/// One step of the agent, formatted exactly as the executor expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Agent steps in the given direction.
    Move(Dir),
    /// Agent steps onto the box's cell, box moves along the second direction.
    Push(Dir, Dir),
    /// Agent steps along the first direction, the box adjacent in the second
    /// direction moves onto the agent's vacated cell.
    Pull(Dir, Dir),
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Move(d) => write!(f, "Move({})", d),
            Action::Push(d, bd) => write!(f, "Push({},{})", d, bd),
            Action::Pull(d, bd) => write!(f, "Pull({},{})", d, bd),
        }
    }
}
