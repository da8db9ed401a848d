use std::io;

use crossterm::style::Color;

use crate::game::GameState;
use crate::grid::{BorderCells, Grid, Position};
use crate::surface::Surface;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const CORNER_CHAR: char = '+';
const HORIZONTAL_EDGE_CHAR: char = '-';
const VERTICAL_EDGE_CHAR: char = '|';

const PANEL_COLOR: Color = Color::Yellow;
const BORDER_COLOR: Color = Color::Blue;
const SNAKE_COLOR: Color = Color::Green;
const APPLE_COLOR: Color = Color::Red;

const LEGEND: &str = "Arrows, WASD or HJKL to move, Esc to quit";

/// Repaints the whole frame on every call. There is no diffing against the
/// previous frame.
pub struct Renderer {
    show_legend: bool,
}

impl Renderer {
    pub fn new(show_legend: bool) -> Self {
        Renderer { show_legend }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, state: &GameState) -> io::Result<()> {
        surface.clear()?;
        self.draw_panel(surface, state)?;
        draw_borders(surface, state.grid(), state.border())?;
        draw_snake(surface, state)?;

        if let Some(apple) = state.food() {
            surface.set_color(APPLE_COLOR)?;
            surface.print_at(apple, APPLE_CHAR)?;
        }

        surface.flush()
    }

    fn draw_panel<S: Surface>(&self, surface: &mut S, state: &GameState) -> io::Result<()> {
        surface.set_color(PANEL_COLOR)?;
        surface.move_to(Position::new(1, 0))?;
        surface.write_glyph(&format!(
            "Score: {}        High Score: {}",
            state.score(),
            state.high_score()
        ))?;

        if self.show_legend {
            surface.move_to(Position::new(1, state.grid().height() + 1))?;
            surface.write_glyph(LEGEND)?;
        }

        Ok(())
    }
}

fn draw_borders<S: Surface>(surface: &mut S, grid: &Grid, border: &BorderCells) -> io::Result<()> {
    surface.set_color(BORDER_COLOR)?;

    let sides = [
        (&border.top, HORIZONTAL_EDGE_CHAR),
        (&border.bottom, HORIZONTAL_EDGE_CHAR),
        (&border.left, VERTICAL_EDGE_CHAR),
        (&border.right, VERTICAL_EDGE_CHAR),
    ];

    for (cells, edge_char) in sides.iter() {
        for &pos in cells.iter() {
            let ch = if grid.is_corner(pos) { CORNER_CHAR } else { *edge_char };
            surface.print_at(pos, ch)?;
        }
    }

    Ok(())
}

fn draw_snake<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    let snake = state.snake();
    surface.set_color(SNAKE_COLOR)?;

    for (i, &pos) in snake.body().enumerate() {
        let ch = if i == 0 { snake.head_char() } else { SNAKE_BODY_CHAR };
        surface.print_at(pos, ch)?;
    }

    Ok(())
}
