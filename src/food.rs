use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{Grid, Position};
use crate::snake::Snake;

// Past this many misses the board is crowded enough to just enumerate the
// free cells.
const MAX_SAMPLES: usize = 64;

/// Picks an unoccupied interior cell for the next food item. Returns `None`
/// once the snake covers the whole interior.
pub fn spawn<R: Rng>(rng: &mut R, grid: &Grid, snake: &Snake) -> Option<Position> {
    if snake.len() >= grid.interior_len() {
        return None;
    }

    for _ in 0..MAX_SAMPLES {
        let pos = Position::new(
            rng.gen_range(2..grid.width()),
            rng.gen_range(2..grid.height()),
        );
        if !snake.occupies(pos) {
            debug!("food spawned at ({}, {})", pos.x, pos.y);
            return Some(pos);
        }
    }

    let pos = grid.interior_cells().filter(|&p| !snake.occupies(p)).choose(rng);
    if let Some(p) = pos {
        debug!("food spawned at ({}, {}) from the free-cell list", p.x, p.y);
    }
    pos
}
