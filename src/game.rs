use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{parse_color, GameConfig};
use crate::fps::FpsCounter;
use crate::input::{command_for, Command, DirectionLatch, KeySource};
use crate::render::{self, Hud, Surface};
use crate::snake::{Bounds, Cell, CrashReason, Direction, GameState, MoveResult::{self, *}, Snake};
use crate::{GameError, Result};

/// How a round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver { score: u32, reason: CrashReason },
    Quit { score: u32 },
}

/// Repeating timer handle. Cancelling consumes it, so it can only happen once;
/// dropping it on an error path releases it too.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
    active: bool,
}

impl Ticker {
    pub fn start(interval: Duration, now: Instant) -> Self {
        log::trace!("ticker started, interval {:?}", interval);
        Ticker { interval, next: now + interval, active: true }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Schedule the following tick. A late tick does not cause a burst of catch-up ticks.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cancel(mut self) {
        self.active = false;
        log::debug!("ticker cancelled");
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if self.active {
            log::debug!("ticker released without cancel");
        }
    }
}

enum Wait {
    Tick,
    Quit,
}

pub struct SnakeGame {
    state: GameState,
    latch: DirectionLatch,
    hud: Hud,
    fps: FpsCounter,
    interval: Duration,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Result<Self> {
        let board = &config.board;
        // Pixel coordinates are drawn as i32
        let sizes = [board.width, board.height, board.cell_width, board.cell_height];
        if sizes.iter().any(|&size| size == 0 || size > i32::MAX as u32) {
            return Err(GameError::InvalidDimensions {
                width: board.width,
                height: board.height,
                cell_width: board.cell_width,
                cell_height: board.cell_height,
            });
        }

        let (columns, rows) = board.grid_size();
        let initial_length = config.snake.initial_length;
        if initial_length == 0 || columns < initial_length.max(2) || rows < 2 {
            return Err(GameError::BoardTooSmall { columns, rows, initial_length });
        }

        let bounds = Bounds {
            width: board.width,
            height: board.height,
            cell_width: board.cell_width,
            cell_height: board.cell_height,
        };
        let segment = Cell {
            x: 0,
            y: 0,
            width: board.cell_width,
            height: board.cell_height,
            color: parse_color(&config.snake.color)?,
        };
        let food = Cell {
            x: config.food.x,
            y: config.food.y,
            width: board.cell_width,
            height: board.cell_height,
            color: parse_color(&config.food.color)?,
        };

        let ticks_per_second = config.timing.ticks_per_second.max(1);

        Ok(SnakeGame {
            state: GameState::new(Snake::new(initial_length, segment), food, bounds),
            latch: DirectionLatch::new(config.snake.speed),
            hud: Hud::from_config(&config.hud)?,
            fps: FpsCounter::new(),
            interval: Duration::from_secs_f64(1.0 / ticks_per_second as f64),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run ticks until the snake crashes or the player quits.
    ///
    /// Between ticks the loop waits on `keys` until the next deadline; presses
    /// only update the direction latch. After a crash no more keys are read.
    pub fn play<S, K>(&mut self, surface: &mut S, keys: &mut K) -> Result<Outcome>
    where
        S: Surface + ?Sized,
        K: KeySource + ?Sized,
    {
        log::info!(
            "game started on a {}x{} grid, {} ticks per second",
            self.state.bounds.columns(),
            self.state.bounds.rows(),
            (1.0 / self.interval.as_secs_f64()).round()
        );

        let mut ticker = Ticker::start(self.interval, Instant::now());

        loop {
            if let Wait::Quit = self.wait_for_tick(&ticker, keys)? {
                ticker.cancel();
                log::info!("player quit with score {}", self.state.score);
                return Ok(Outcome::Quit { score: self.state.score });
            }
            ticker.advance(Instant::now());

            if let Crashed(reason) = self.tick(surface, Instant::now())? {
                ticker.cancel();
                return Ok(Outcome::GameOver { score: self.state.score, reason });
            }
        }
    }

    fn wait_for_tick<K: KeySource + ?Sized>(&mut self, ticker: &Ticker, keys: &mut K) -> Result<Wait> {
        loop {
            let now = Instant::now();
            if now >= ticker.deadline() {
                return Ok(Wait::Tick);
            }

            if let Some(ev) = keys.next_key(ticker.deadline() - now)? {
                match command_for(&ev) {
                    Some(Command::Quit) => return Ok(Wait::Quit),
                    Some(Command::Turn(direction)) => self.latch.press(direction),
                    None => {}
                }
            }
        }
    }

    /// Press a direction key without going through a [`KeySource`].
    pub fn press(&mut self, direction: Direction) {
        if !self.state.game_over {
            self.latch.press(direction);
        }
    }

    /// One frame: draw the board, step the simulation, draw the HUD.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) -> Result<MoveResult> {
        if self.state.game_over {
            return Ok(Halted);
        }

        surface.clear();
        render::draw_food(surface, &self.state);
        render::draw_snake(surface, &self.state);

        let (next, res) = self.state.step(self.latch.direction(), &mut self.rng);
        self.state = next;

        match res {
            Ate => log::debug!(
                "food eaten, score {}, new food at ({}, {})",
                self.state.score,
                self.state.food.x,
                self.state.food.y
            ),
            Crashed(reason) => log::info!("game over ({:?}) with score {}", reason, self.state.score),
            Moved | Halted => {}
        }

        render::draw_score(surface, self.state.score, &self.hud);
        let fps = self.fps.sample(now);
        log::trace!("fps {:.1}", fps);
        render::draw_fps(surface, fps, &self.hud);

        if self.state.game_over {
            render::draw_game_over(surface, &self.hud);
            render::draw_replay_hint(surface, &self.hud);
        }

        surface.present()?;
        Ok(res)
    }
}
