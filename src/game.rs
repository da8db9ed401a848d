use std::cmp::max;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::clock::{Clock, Fired};
use crate::error::{GameOver, Result};
use crate::food;
use crate::grid::{BorderCells, Grid, Position};
use crate::input::Command;
use crate::render::Renderer;
use crate::settings::{GameOverPolicy, Settings};
use crate::snake::{Snake, Step, Turn};
use crate::surface::Surface;

// Poll interval while the clock is stopped.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Everything a round needs: playfield, snake, food and the high score that
/// outlives rounds.
#[derive(Clone, Debug)]
pub struct GameState {
    grid: Grid,
    border: BorderCells,
    snake: Snake,
    food: Option<Position>,
    high_score: usize,
}

impl GameState {
    pub fn new<R: Rng>(grid: Grid, rng: &mut R) -> Self {
        let snake = Snake::new(grid.center());
        let food = food::spawn(rng, &grid, &snake);

        GameState { grid, border: grid.border_cells(), snake, food, high_score: 0 }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let high_score = self.high_score;
        *self = GameState::new(self.grid, rng);
        self.high_score = high_score;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn border(&self) -> &BorderCells {
        &self.border
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub fn high_score(&self) -> usize {
        self.high_score
    }

    /// One simulation step. Only moves when the snake's axis is among the
    /// `fired` cadences.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, fired: Fired) -> std::result::Result<Step, GameOver> {
        match self.snake.heading() {
            Some(dir) if fired.drives(dir) => {}
            _ => return Ok(Step::Idle),
        }

        let eats = self.food.is_some() && self.snake.next_head() == self.food;
        if eats {
            self.snake.grow();
        }

        let step = self.snake.advance(&self.grid)?;

        if let Step::Moved { grew: true } = step {
            self.high_score = max(self.high_score, self.score());
            // respawn after the move so the new head is excluded
            self.food = food::spawn(rng, &self.grid, &self.snake);
            if self.food.is_none() {
                return Err(GameOver::BoardFilled);
            }
        }

        Ok(step)
    }

    #[cfg(test)]
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub fn set_food(&mut self, food: Option<Position>) {
        self.food = food;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the state and drives it from one thread: key presses and both
/// cadences are handled in turn, never concurrently.
pub struct Game<S, R = ThreadRng> {
    surface: S,
    rng: R,
    policy: GameOverPolicy,
    state: GameState,
    clock: Clock,
    renderer: Renderer,
}

impl<S: Surface> Game<S, ThreadRng> {
    pub fn new(surface: S, settings: &Settings) -> Self {
        Game::with_rng(surface, settings, rand::thread_rng(), Instant::now())
    }
}

impl<S: Surface, R: Rng> Game<S, R> {
    pub fn with_rng(surface: S, settings: &Settings, mut rng: R, now: Instant) -> Self {
        let state = GameState::new(Grid::new(settings.width), &mut rng);
        let clock = Clock::new(settings.horizontal_period, settings.vertical_period, now);

        Game {
            surface,
            rng,
            policy: settings.game_over_policy,
            state,
            clock,
            renderer: Renderer::new(settings.show_legend),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    fn clock(&self) -> &Clock {
        &self.clock
    }

    #[cfg(test)]
    fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs until the player quits (or a round ends under the exit policy),
    /// then restores the terminal whatever the outcome.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_loop();
        let restored = self.surface.restore();

        result?;
        restored?;
        Ok(())
    }

    fn run_loop(&mut self) -> Result<()> {
        self.start(Instant::now())?;

        loop {
            let timeout = self.clock.time_until_next(Instant::now()).unwrap_or(IDLE_POLL);

            // A key press is handled before any timer that came due meanwhile.
            if let Some(ev) = self.surface.poll_key(timeout)? {
                if let Some(cmd) = Command::from_key_event(&ev) {
                    if self.handle_command(cmd, Instant::now())? == Flow::Quit {
                        return Ok(());
                    }
                }
            }

            if self.on_timer(Instant::now())? == Flow::Quit {
                return Ok(());
            }
        }
    }

    pub fn start(&mut self, now: Instant) -> Result<()> {
        info!("starting round on a {}x{} grid", self.state.grid.width(), self.state.grid.height());
        self.surface.setup()?;
        self.render()?;
        self.clock.reset(now);
        Ok(())
    }

    pub fn handle_command(&mut self, cmd: Command, now: Instant) -> Result<Flow> {
        match cmd {
            Command::Quit => {
                info!("quit requested, score {}", self.state.score());
                self.clock.stop();
                Ok(Flow::Quit)
            }
            Command::Turn(dir) => match self.state.snake.turn(dir) {
                Turn::Accepted => {
                    debug!("heading now {:?}", dir);
                    self.clock.reset(now);
                    self.tick(Fired::FORCED, now)
                }
                Turn::Rejected => {
                    debug!("ignored reversal to {:?}", dir);
                    Ok(Flow::Continue)
                }
                Turn::Unchanged => Ok(Flow::Continue),
            },
        }
    }

    pub fn on_timer(&mut self, now: Instant) -> Result<Flow> {
        let fired = self.clock.poll(now);
        if !fired.any() {
            return Ok(Flow::Continue);
        }

        self.tick(fired, now)
    }

    fn tick(&mut self, fired: Fired, now: Instant) -> Result<Flow> {
        match self.state.tick(&mut self.rng, fired) {
            Ok(_) => {
                self.render()?;
                Ok(Flow::Continue)
            }
            Err(reason) => self.game_over(reason, now),
        }
    }

    fn game_over(&mut self, reason: GameOver, now: Instant) -> Result<Flow> {
        // no stale cadence may touch the next round
        self.clock.stop();
        info!(
            "round over: {} (score {}, high score {})",
            reason,
            self.state.score(),
            self.state.high_score()
        );

        match self.policy {
            GameOverPolicy::Exit => Ok(Flow::Quit),
            GameOverPolicy::Reset => {
                self.state.reset(&mut self.rng);
                self.start(now)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.draw(&mut self.surface, &self.state)?;
        Ok(())
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use crate::surface::recording::{Call, Recorder};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn game(policy: GameOverPolicy, now: Instant) -> Game<Recorder, StdRng> {
        let settings = Settings { game_over_policy: policy, ..Settings::default() };
        Game::with_rng(Recorder::default(), &settings, rng(), now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn starts_as_a_single_idle_segment() {
        let now = Instant::now();
        let mut game = game(GameOverPolicy::Reset, now);
        game.start(now).unwrap();

        for i in 1..=10 {
            game.on_timer(now + Duration::from_millis(100 * i)).unwrap();
        }

        let state = game.state();
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().head(), Position::new(15, 7));
        assert_eq!(state.snake().heading(), None);
        assert_eq!(state.score(), 0);
        // every timer fire still repaints
        assert_eq!(game.surface().count(&Call::Clear), 11);
    }

    #[test]
    fn moves_right_three_times() {
        let mut rng = rng();
        let mut state = GameState::new(Grid::new(30), &mut rng);
        state.set_food(Some(Position::new(3, 3)));
        state.snake.turn(Right);

        for x in 16..=18 {
            assert_eq!(state.tick(&mut rng, Fired::FORCED), Ok(Step::Moved { grew: false }));
            assert_eq!(state.snake().head(), Position::new(x, 7));
            assert_eq!(state.snake().len(), 1);
        }
    }

    #[test]
    fn eating_grows_and_relocates_food() {
        let mut rng = rng();
        let mut state = GameState::new(Grid::new(30), &mut rng);
        state.snake.turn(Right);
        state.set_food(Some(Position::new(16, 7)));

        assert_eq!(state.tick(&mut rng, Fired::FORCED), Ok(Step::Moved { grew: true }));
        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.score(), 1);
        assert_eq!(state.high_score(), 1);

        let food = state.food().unwrap();
        assert!(state.grid().is_interior(food));
        assert!(!state.snake().occupies(food));
    }

    #[test]
    fn only_the_matching_cadence_moves_the_snake() {
        let mut rng = rng();
        let mut state = GameState::new(Grid::new(30), &mut rng);
        state.set_food(None);
        state.snake.turn(Up);

        let horizontal = Fired { horizontal: true, vertical: false };
        assert_eq!(state.tick(&mut rng, horizontal), Ok(Step::Idle));
        assert_eq!(state.snake().head(), Position::new(15, 7));

        let vertical = Fired { horizontal: false, vertical: true };
        assert_eq!(state.tick(&mut rng, vertical), Ok(Step::Moved { grew: false }));
        assert_eq!(state.snake().head(), Position::new(15, 6));
    }

    #[test]
    fn reversal_is_ignored_and_turn_restarts_timers() {
        let t0 = Instant::now();
        let mut game = game(GameOverPolicy::Reset, t0);
        game.start(t0).unwrap();
        game.state_mut().set_food(None);

        game.handle_command(Command::Turn(Right), t0).unwrap();
        assert_eq!(game.state().snake().heading(), Some(Right));
        // the accepted turn forced one move
        assert_eq!(game.state().snake().head(), Position::new(16, 7));

        let t1 = t0 + Duration::from_millis(50);
        game.handle_command(Command::Turn(Left), t1).unwrap();
        assert_eq!(game.state().snake().heading(), Some(Right));
        assert_eq!(game.clock().next_deadline(), Some(t0 + Duration::from_millis(100)));

        let t2 = t0 + Duration::from_millis(70);
        let clears = game.surface().count(&Call::Clear);
        game.handle_command(Command::Turn(Up), t2).unwrap();
        assert_eq!(game.state().snake().heading(), Some(Up));
        assert_eq!(game.state().snake().head(), Position::new(16, 6));
        assert_eq!(game.clock().next_deadline(), Some(t2 + Duration::from_millis(100)));
        assert_eq!(game.surface().count(&Call::Clear), clears + 1);
    }

    #[test]
    fn self_collision_resets_before_drawing() {
        let now = Instant::now();
        let mut game = game(GameOverPolicy::Reset, now);
        game.start(now).unwrap();
        game.state_mut().set_snake(Snake::from_body(&[(5, 5), (4, 5), (6, 5), (6, 6)], Some(Right)));
        game.state_mut().set_food(None);

        let flow = game.on_timer(now + Duration::from_millis(100)).unwrap();

        assert_eq!(flow, Flow::Continue);
        // the colliding frame is never drawn: (6, 5) only ever shows the old body glyph
        assert!(game.surface().glyphs_at(Position::new(6, 5)).iter().all(|g| *g != ">"));
        let state = game.state();
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().head(), Position::new(15, 7));
        assert_eq!(state.snake().heading(), None);
        assert!(game.clock().is_running());
    }

    #[test]
    fn wall_collision_is_handled_like_self_collision() {
        let now = Instant::now();
        let mut game = game(GameOverPolicy::Reset, now);
        game.start(now).unwrap();
        game.state_mut().set_snake(Snake::from_body(&[(29, 7), (28, 7)], Some(Right)));

        let later = now + Duration::from_millis(100);
        assert_eq!(game.on_timer(later).unwrap(), Flow::Continue);
        assert_eq!(game.state().snake().len(), 1);
        assert_eq!(game.state().snake().head(), Position::new(15, 7));
        // the reset restarted both cadences from the collision time
        assert_eq!(game.clock().next_deadline(), Some(later + Duration::from_millis(100)));
    }

    #[test]
    fn exit_policy_stops_the_clock() {
        let now = Instant::now();
        let mut game = game(GameOverPolicy::Exit, now);
        game.start(now).unwrap();
        game.state_mut().set_snake(Snake::from_body(&[(29, 7)], Some(Right)));

        assert_eq!(game.on_timer(now + Duration::from_millis(100)).unwrap(), Flow::Quit);
        assert!(!game.clock().is_running());
    }

    #[test]
    fn high_score_survives_reset() {
        let now = Instant::now();
        let mut game = game(GameOverPolicy::Reset, now);
        game.start(now).unwrap();
        game.state_mut().set_food(Some(Position::new(16, 7)));

        game.handle_command(Command::Turn(Right), now).unwrap();
        assert_eq!(game.state().high_score(), 1);

        game.state_mut().set_snake(Snake::from_body(&[(29, 7)], Some(Right)));
        game.on_timer(now + Duration::from_millis(100)).unwrap();

        assert_eq!(game.state().score(), 0);
        assert_eq!(game.state().high_score(), 1);
    }

    #[test]
    fn filling_the_board_ends_the_round() {
        let mut rng = rng();
        let grid = Grid::new(8);
        let mut state = GameState::new(grid, &mut rng);
        // head at (3, 3) heading left onto the only free cell
        let mut cells: Vec<(u16, u16)> = (3..=7).map(|x| (x, 3)).collect();
        cells.extend((2..=7).rev().map(|x| (x, 2)));
        state.set_snake(Snake::from_body(&cells, Some(Left)));
        state.set_food(Some(Position::new(2, 3)));

        assert_eq!(state.tick(&mut rng, Fired::FORCED), Err(GameOver::BoardFilled));
    }

    #[test]
    fn run_quits_on_escape_and_restores_the_terminal() {
        let settings = Settings::default();
        let keys = vec![key(KeyCode::Right), key(KeyCode::Char('x')), key(KeyCode::Esc)];
        let mut game = Game::with_rng(Recorder::with_keys(keys), &settings, rng(), Instant::now());

        game.run().unwrap();

        let calls = &game.surface().calls;
        assert_eq!(calls[0], Call::EnterAlternateScreen);
        assert_eq!(
            calls[calls.len() - 4..],
            [Call::DisableRawMode, Call::ShowCursor, Call::LeaveAlternateScreen, Call::Flush]
        );
        assert_eq!(game.state().snake().heading(), Some(Right));
        assert!(!game.clock().is_running());
    }

    proptest! {
        #[test]
        fn random_play_keeps_invariants(
            seed in any::<u64>(),
            turns in prop::collection::vec(0u8..4, 1..120)
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = GameState::new(Grid::new(30), &mut rng);

            for t in turns {
                let dir = [Up, Down, Left, Right][t as usize];
                state.snake.turn(dir);
                let len = state.snake().len();

                match state.tick(&mut rng, Fired::FORCED) {
                    Ok(Step::Moved { grew }) => {
                        prop_assert_eq!(state.snake().len(), len + grew as usize);
                        let food = state.food().unwrap();
                        prop_assert!(state.grid().is_interior(food));
                        prop_assert!(!state.snake().occupies(food));
                        prop_assert!(state.high_score() >= state.score());
                    }
                    Ok(Step::Idle) => prop_assert!(false, "heading is set"),
                    Err(_) => break,
                }
            }
        }
    }
}
