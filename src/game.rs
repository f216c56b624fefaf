use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{GameConfig, GridSize, SpawnPolicy};
use crate::food::FoodManager;
use crate::input::{Direction, direction_change_is_valid};
use crate::obstacles::ObstacleSet;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    GameOver,
}

/// The collision that ended a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    SelfCollision,
    Wall,
    OutOfBounds,
}

/// Outcome of every collision check for one head position.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CollisionReport {
    pub self_collision: bool,
    pub wall: bool,
    pub out_of_bounds: bool,
}

impl CollisionReport {
    #[must_use]
    pub fn any(self) -> bool {
        self.self_collision || self.wall || self.out_of_bounds
    }

    /// First check that fired, in evaluation order.
    #[must_use]
    pub fn reason(self) -> Option<DeathReason> {
        if self.self_collision {
            Some(DeathReason::SelfCollision)
        } else if self.wall {
            Some(DeathReason::Wall)
        } else if self.out_of_bounds {
            Some(DeathReason::OutOfBounds)
        } else {
            None
        }
    }
}

/// Owned, serializable view of everything a front-end draws.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub head: Position,
    pub body: Vec<Position>,
    pub walls: Vec<Position>,
    pub food: Position,
    pub bonus_food: Option<Position>,
    pub celebration_active: bool,
    pub direction: Direction,
    pub score: usize,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    pub food: FoodManager,
    snake: Snake,
    obstacles: ObstacleSet,
    direction: Direction,
    eaten: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    bounds: GridSize,
    spawn_policy: SpawnPolicy,
    bonus_interval: u32,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates a state whose food placement is seeded from OS entropy.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Creates a state drawing food positions from `rng`.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Self {
        let bounds = config.grid();
        let snake = Snake::new(config.start);
        let obstacles = ObstacleSet::new(config.walls.iter().copied());

        let mut food = FoodManager::new(config.start, config.celebration());
        food.place_primary(&mut rng, bounds, config.spawn_policy, |p| {
            snake.occupies(p) || obstacles.contains(p)
        });

        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            walls = obstacles.len(),
            food_x = food.primary().x,
            food_y = food.primary().y,
            "new game"
        );

        Self {
            food,
            snake,
            obstacles,
            direction: config.start_direction,
            eaten: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            bounds,
            spawn_policy: config.spawn_policy,
            bonus_interval: config.bonus_interval.max(1),
            rng,
        }
    }

    /// Advances simulation by one gameplay tick. No-op once the game is over.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        let head = self.snake.head();

        if head == self.food.primary() {
            self.eat_primary();
        }

        if self.food.bonus() == Some(head) {
            self.food.consume_bonus();
            tracing::info!(x = head.x, y = head.y, "bonus food eaten");
        }

        self.snake.advance(self.direction);

        let report = self.collisions();
        if report.any() {
            self.status = GameStatus::GameOver;
            self.death_reason = report.reason();
            tracing::info!(
                score = self.score(),
                ticks = self.tick_count,
                reason = ?self.death_reason,
                "game over"
            );
        }
    }

    /// Steers the snake unless `direction` reverses it onto its own neck.
    ///
    /// Returns whether the request was applied.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running
            || !direction_change_is_valid(self.direction, direction)
        {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Feeds elapsed wall-clock time to timers that run beside the tick.
    pub fn advance_timers(&mut self, elapsed: Duration) {
        if self.food.advance_timers(elapsed) {
            tracing::debug!("celebration ended");
        }
    }

    /// Evaluates every collision check against the current head.
    #[must_use]
    pub fn collisions(&self) -> CollisionReport {
        let head = self.snake.head();

        CollisionReport {
            self_collision: self.snake.self_collides(),
            wall: self.obstacles.contains(head),
            out_of_bounds: !head.is_within_bounds(self.bounds),
        }
    }

    fn eat_primary(&mut self) {
        let (bounds, policy) = (self.bounds, self.spawn_policy);
        let snake = &mut self.snake;
        let obstacles = &self.obstacles;

        // The new food is placed before the snake grows onto the eaten tile.
        let eaten_at = self.food.consume_primary(&mut self.rng, bounds, policy, |p| {
            snake.occupies(p) || obstacles.contains(p)
        });
        snake.grow(eaten_at);
        self.eaten += 1;

        tracing::debug!(
            eaten = self.eaten,
            next_x = self.food.primary().x,
            next_y = self.food.primary().y,
            "food eaten"
        );

        if self.eaten % self.bonus_interval == 0 {
            let snake = &self.snake;
            let bonus = self.food.place_bonus(&mut self.rng, bounds, policy, |p| {
                snake.occupies(p) || obstacles.contains(p)
            });
            tracing::debug!(x = bonus.x, y = bonus.y, "bonus food placed");
        }
    }
}

impl<R> GameState<R> {
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Primary foods eaten so far.
    #[must_use]
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    /// Score shown to the player, equal to the body length.
    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            head: self.snake.head(),
            body: self.snake.body().to_vec(),
            walls: self.obstacles.sorted(),
            food: self.food.primary(),
            bonus_food: self.food.bonus(),
            celebration_active: self.food.celebration_active(),
            direction: self.direction,
            score: self.score(),
            status: self.status,
            death_reason: self.death_reason,
        }
    }
}
