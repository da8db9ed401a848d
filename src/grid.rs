use crate::snake::Direction;
use crate::TermInt;

/// A cell on the playfield. Coordinates are 1-based and double as screen
/// coordinates, leaving row 0 free for the info panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: TermInt,
    pub y: TermInt,
}

impl Position {
    pub const fn new(x: TermInt, y: TermInt) -> Self {
        Position { x, y }
    }

    /// Wraps past zero, which lands far outside any grid.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Position::new(self.x.wrapping_add_signed(dx), self.y.wrapping_add_signed(dy))
    }
}

impl From<(TermInt, TermInt)> for Position {
    fn from((x, y): (TermInt, TermInt)) -> Self {
        Position::new(x, y)
    }
}

/// Border cells per side, ordered by increasing coordinate. Corners show up
/// in two lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderCells {
    pub top: Vec<Position>,
    pub bottom: Vec<Position>,
    pub left: Vec<Position>,
    pub right: Vec<Position>,
}

impl BorderCells {
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.top.iter().chain(&self.bottom).chain(&self.left).chain(&self.right)
    }
}

/// Fixed-size playfield with a one-cell border ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    /// Terminal cells are about twice as tall as wide, so the height is half
    /// the width, rounded half up.
    pub fn new(width: TermInt) -> Self {
        Grid { width, height: (width + 1) / 2 }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn is_border_cell(&self, pos: Position) -> bool {
        let on_x_edge = pos.x == 1 || pos.x == self.width;
        let on_y_edge = pos.y == 1 || pos.y == self.height;
        let in_x = pos.x >= 1 && pos.x <= self.width;
        let in_y = pos.y >= 1 && pos.y <= self.height;

        (on_x_edge && in_y) || (on_y_edge && in_x)
    }

    /// Touching the border ring counts as out of bounds for the snake head.
    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.x <= 1 || pos.x >= self.width || pos.y <= 1 || pos.y >= self.height
    }

    pub fn is_interior(&self, pos: Position) -> bool {
        !self.is_out_of_bounds(pos)
    }

    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.x == 1 || pos.x == self.width) && (pos.y == 1 || pos.y == self.height)
    }

    pub fn border_cells(&self) -> BorderCells {
        let (w, h) = (self.width, self.height);

        BorderCells {
            top: (1..=w).map(|x| Position::new(x, 1)).collect(),
            bottom: (1..=w).map(|x| Position::new(x, h)).collect(),
            left: (1..=h).map(|y| Position::new(1, y)).collect(),
            right: (1..=h).map(|y| Position::new(w, y)).collect(),
        }
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width, self.height);
        (2..h).flat_map(move |y| (2..w).map(move |x| Position::new(x, y)))
    }

    pub fn interior_len(&self) -> usize {
        let w = self.width.saturating_sub(2) as usize;
        let h = self.height.saturating_sub(2) as usize;
        w * h
    }
}
