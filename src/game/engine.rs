use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::{
    action::Direction,
    config::{ARENA_SIZE, CELL_SIZE, GameConfig, VariantRules},
    fruit::{Fruit, FruitKind, place_fruit},
    snapshot::Snapshot,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Head of the snake at the start of every game
pub const INITIAL_HEAD: Position = Position { x: 160, y: 200 };

/// Length of the snake at the start of every game
pub const INITIAL_LENGTH: usize = 3;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Kind of fruit eaten this step, if any
    pub ate_fruit: Option<FruitKind>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// New tick interval; the tick source must be rescheduled to it
    pub new_interval: Option<Duration>,
    /// Whether this step switched the fin bonus on
    pub bonus_activated: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
    /// State after the step, for rendering
    pub snapshot: Snapshot,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rules: VariantRules,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rules: config.variant.rules(),
            config,
            rng,
        }
    }

    /// Create a fresh idle game
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(INITIAL_HEAD, Direction::Right, INITIAL_LENGTH);

        // A fresh snake leaves most of the arena free, so placement cannot fail
        let fruit = self.spawn_fruit(&snake).unwrap_or(Fruit::new(
            Position::new(ARENA_SIZE - CELL_SIZE, ARENA_SIZE - CELL_SIZE),
            self.rules.catalog[0],
        ));

        GameState::new(snake, fruit, self.config.initial_interval())
    }

    /// Start an idle game; returns false if it was not idle
    pub fn start(&self, state: &mut GameState) -> bool {
        if state.phase != Phase::Idle {
            return false;
        }

        state.phase = Phase::Running;
        info!(
            "Game started: variant={} interval={:?}",
            self.config.variant.as_str(),
            state.interval
        );
        true
    }

    /// Request a direction for the next tick
    ///
    /// Ignored when the game is not running or when the request reverses
    /// the direction the snake last moved in. A later accepted request
    /// before the same tick replaces an earlier one.
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) -> bool {
        if !state.is_running() {
            return false;
        }

        if state.snake.direction.is_opposite(direction) {
            trace!("Ignored reversal {:?} -> {:?}", state.snake.direction, direction);
            return false;
        }

        state.pending_direction = Some(direction);
        true
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: state.phase == Phase::Over,
                info: StepInfo::default(),
                snapshot: state.snapshot(),
            };
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_fruit = new_head == state.fruit.position;
        state.snake.advance(new_head, ate_fruit);
        state.ticks += 1;

        let mut info = StepInfo::default();
        let mut arena_full = false;

        if ate_fruit {
            let eaten = state.fruit.kind;
            state.score += eaten.score();
            state.fruits_eaten += 1;
            info.ate_fruit = Some(eaten);
            debug!("Ate {} at {:?}: score={}", eaten.name(), new_head, state.score);

            match self.spawn_fruit(&state.snake) {
                Some(fruit) => {
                    state.fruit = fruit;
                    // Tested against the replacement fruit's value
                    if self.rules.bonus_enabled && state.score % (fruit.score() * 3) == 0 {
                        state.bonus_active = true;
                        info.bonus_activated = true;
                        debug!("Fin bonus activated at score {}", state.score);
                    }
                }
                None => arena_full = true,
            }

            info.new_interval = self.speed_up(state);
        }

        info.collision_type = Self::check_terminal(state);

        let terminated = info.collision_type.is_some() || arena_full;
        if terminated {
            state.phase = Phase::Over;
            match info.collision_type {
                Some(collision) => info!(
                    "Game over: {} collision at {:?}, score={}",
                    collision.as_str(),
                    state.snake.head(),
                    state.score
                ),
                None => info!("Game over: arena full, score={}", state.score),
            }
        }

        StepResult {
            terminated,
            info,
            snapshot: state.snapshot(),
        }
    }

    /// Detect a terminal condition in the given state
    pub fn check_terminal(state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        None
    }

    /// Switch the fin bonus off; returns whether it was on
    pub fn expire_bonus(&self, state: &mut GameState) -> bool {
        let was_active = state.bonus_active;
        state.bonus_active = false;
        if was_active {
            debug!("Fin bonus expired");
        }
        was_active
    }

    /// Shorten the tick interval toward the variant floor
    fn speed_up(&self, state: &mut GameState) -> Option<Duration> {
        if state.interval <= self.rules.speed_floor {
            return None;
        }

        state.interval = state
            .interval
            .saturating_sub(self.rules.speed_step)
            .max(self.rules.speed_floor);
        debug!("Tick interval now {:?}", state.interval);
        Some(state.interval)
    }

    fn spawn_fruit(&mut self, snake: &Snake) -> Option<Fruit> {
        place_fruit(&mut self.rng, snake, self.rules.catalog)
    }
}
