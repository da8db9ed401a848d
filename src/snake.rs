use std::collections::VecDeque;

use crate::error::GameOver;
use crate::grid::{Grid, Position};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

/// Outcome of a turn request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Accepted,
    Unchanged,
    /// The request was the exact opposite of the current heading.
    Rejected,
}

/// Outcome of a successful advance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Idle,
    Moved { grew: bool },
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>, // head first
    heading: Option<Direction>,
    growth_pending: bool,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Snake { body: VecDeque::from(vec![start]), heading: None, growth_pending: false }
    }

    #[cfg(test)]
    pub fn from_body(body: &[(u16, u16)], heading: Option<Direction>) -> Self {
        assert!(!body.is_empty());
        let body = body.iter().map(|&p| Position::from(p)).collect();
        Snake { body, heading, growth_pending: false }
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn turn(&mut self, direction: Direction) -> Turn {
        match self.heading {
            Some(current) if current == direction => Turn::Unchanged,
            Some(current) if current.opposite() == direction => Turn::Rejected,
            _ => {
                self.heading = Some(direction);
                Turn::Accepted
            }
        }
    }

    pub fn next_head(&self) -> Option<Position> {
        self.heading.map(|dir| self.head().step(dir))
    }

    pub fn grow(&mut self) {
        self.growth_pending = true;
    }

    /// Moves the snake one cell along its heading. Nothing changes when the
    /// move would crash, so the body never holds a duplicate cell.
    pub fn advance(&mut self, grid: &Grid) -> Result<Step, GameOver> {
        let new_head = match self.next_head() {
            Some(pos) => pos,
            None => return Ok(Step::Idle),
        };

        // The tail moves out of the way this tick unless we are growing.
        let survivors = if self.growth_pending { self.body.len() } else { self.body.len() - 1 };
        if self.body.iter().take(survivors).any(|&p| p == new_head) {
            return Err(GameOver::SelfCollision);
        }

        if grid.is_out_of_bounds(new_head) {
            return Err(GameOver::BoundaryCollision);
        }

        self.body.push_front(new_head);

        let grew = self.growth_pending;
        if grew {
            self.growth_pending = false;
        } else {
            self.body.pop_back();
        }

        Ok(Step::Moved { grew })
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Some(Up) => '^',
            Some(Down) => 'v',
            Some(Left) => '<',
            Some(Right) => '>',
            None => '@',
        }
    }
}
