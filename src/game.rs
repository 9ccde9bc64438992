use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::capabilities::{Notifier, RandomSource};
use crate::config::GameConfig;
use crate::grid::{Direction, Position, Snake};
use crate::leaderboard::{Leaderboard, PlayerRecord};
use crate::store::KeyValueStore;
use crate::ticker::Ticker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// Every cell is snake; nowhere left to put food.
    BoardFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate,
    Ended(GameOverCause),
}

/// Snake, food and score on a square grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid_size: u16,
    snake: Snake,
    food: Option<Position>,
    score: u32,
}

impl Board {
    pub fn new(config: &GameConfig, rng: &mut impl RandomSource) -> Self {
        let (x, y) = config.start_position();
        let mut board = Board {
            grid_size: config.grid_size,
            snake: Snake::new(Position::new(x, y), Direction::Right),
            food: None,
            score: 0,
        };
        board.food = board.place_food(rng);
        board
    }

    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }

    /// Rejection-samples a free cell. `None` once the snake covers the board.
    fn place_food(&self, rng: &mut impl RandomSource) -> Option<Position> {
        if self.snake.len() >= self.cell_count() {
            return None;
        }

        loop {
            let pos = Position::new(
                rng.index(self.grid_size) as i32,
                rng.index(self.grid_size) as i32,
            );
            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }
    }

    /// Moves the snake one cell along its heading.
    pub fn step(&mut self, rng: &mut impl RandomSource) -> StepResult {
        let new_head = self.snake.next_head();

        if !new_head.in_bounds(self.grid_size) {
            return StepResult::Ended(GameOverCause::Wall);
        }
        // The tail still counts: it has not moved out of the way yet.
        if self.snake.occupies(new_head) {
            return StepResult::Ended(GameOverCause::SelfCollision);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);

        if !ate {
            return StepResult::Moved;
        }

        self.score += 1;
        self.food = self.place_food(rng);
        match self.food {
            Some(_) => StepResult::Ate,
            None => StepResult::Ended(GameOverCause::BoardFull),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver { cause: GameOverCause, final_score: u32 },
}

pub struct Game<R, S, N> {
    config: GameConfig,
    phase: Phase,
    board: Board,
    pending_direction: Option<Direction>,
    player_name: String,
    ticker: Ticker,
    leaderboard: Leaderboard,
    rng: R,
    store: S,
    notifier: N,
}

impl<R, S, N> Game<R, S, N>
where
    R: RandomSource,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(config: GameConfig, mut rng: R, store: S, notifier: N) -> Self {
        let leaderboard = Leaderboard::load(&store, config.leaderboard_size);
        info!(
            "Loaded leaderboard with {} entries",
            leaderboard.entries().len()
        );
        let board = Board::new(&config, &mut rng);

        Game {
            config,
            phase: Phase::Idle,
            board,
            pending_direction: None,
            player_name: String::new(),
            ticker: Ticker::new(),
            leaderboard,
            rng,
            store,
            notifier,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.ticker.interval()
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_tick(now)
    }

    /// Begins a fresh run. Refused while running or when the name is blank.
    pub fn start(&mut self, name: &str, now: Instant) -> bool {
        if self.phase == Phase::Running {
            return false;
        }

        let name = name.trim();
        if name.is_empty() {
            self.notifier.notify("Please enter your name");
            return false;
        }

        info!("Starting game for {}", name);
        self.player_name = name.to_string();
        self.board = Board::new(&self.config, &mut self.rng);
        self.pending_direction = None;
        self.phase = Phase::Running;
        self.ticker.start(self.config.initial_interval, now);
        true
    }

    /// Queues a turn for the next tick if it passes the axis lock.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if !self.board.snake().direction().is_orthogonal(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Runs a tick if one is due.
    pub fn update(&mut self, now: Instant) -> Option<StepResult> {
        if self.ticker.fire(now) {
            self.tick(now)
        } else {
            None
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<StepResult> {
        if self.phase != Phase::Running {
            return None;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.board.snake.turn(direction);
        }

        let result = self.board.step(&mut self.rng);
        match result {
            StepResult::Moved => {}
            StepResult::Ate => self.on_food_eaten(now),
            StepResult::Ended(cause) => self.end_game(cause),
        }
        Some(result)
    }

    /// Dismisses the game-over screen.
    pub fn acknowledge(&mut self) {
        if let Phase::GameOver { .. } = self.phase {
            debug!("Game over acknowledged");
            self.phase = Phase::Idle;
        }
    }

    fn on_food_eaten(&mut self, now: Instant) {
        let score = self.board.score();
        debug!("Ate food, score {}", score);

        if score % self.config.speed_threshold.max(1) != 0 {
            return;
        }
        let interval = self.config.interval_for_score(score);
        if self.ticker.interval() != Some(interval) {
            info!("Speeding up to {}ms at score {}", interval.as_millis(), score);
            self.ticker.start(interval, now);
        }
    }

    fn end_game(&mut self, cause: GameOverCause) {
        let final_score = self.board.score();
        info!("Game over ({:?}) with score {}", cause, final_score);

        self.ticker.stop();
        self.pending_direction = None;
        self.phase = Phase::GameOver { cause, final_score };

        let record = PlayerRecord::new(self.player_name.clone(), final_score);
        if let Err(e) = self.leaderboard.save(&mut self.store, record) {
            error!("Error saving score: {}", e);
        }

        let message = match cause {
            GameOverCause::BoardFull => "You win!",
            _ => "Game Over!",
        };
        self.notifier.notify(message);
    }
}
