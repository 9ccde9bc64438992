use std::time::Duration;

/// Key the leaderboard blob is stored under.
pub const LEADERBOARD_KEY: &str = "leaderboard";

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Cells per side of the square board.
    pub grid_size: u16,
    pub initial_interval: Duration,
    /// Every this many points the tick interval shrinks.
    pub speed_threshold: u32,
    pub speed_decrement: Duration,
    pub min_interval: Duration,
    pub leaderboard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 20,
            initial_interval: Duration::from_millis(200),
            speed_threshold: 5,
            speed_decrement: Duration::from_millis(20),
            min_interval: Duration::from_millis(50),
            leaderboard_size: 10,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(grid_size: u16) -> Self {
        GameConfig {
            grid_size,
            ..Default::default()
        }
    }

    /// Where the snake starts. Matches (10, 10) on the default board.
    pub fn start_position(&self) -> (i32, i32) {
        let mid = (self.grid_size / 2) as i32;
        (mid, mid)
    }

    /// Tick interval for a given score under the linear speed ramp.
    pub fn interval_for_score(&self, score: u32) -> Duration {
        let steps = score / self.speed_threshold.max(1);
        self.initial_interval
            .saturating_sub(self.speed_decrement.saturating_mul(steps))
            .max(self.min_interval)
    }
}

/// Canvas units used when drawing a board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub cell_size: u16,
    pub snake_size: u16,
    pub food_size: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            cell_size: 20,
            snake_size: 15,
            food_size: 10,
        }
    }
}

impl RenderConfig {
    pub fn terminal() -> Self {
        RenderConfig {
            cell_size: 1,
            snake_size: 1,
            food_size: 1,
        }
    }
}
