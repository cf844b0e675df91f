use std::time::Duration;

use super::action::Direction;
use super::config::{ARENA_SIZE, CELL_SIZE};
use super::fruit::Fruit;

/// A grid-aligned position in the arena, in position units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta(CELL_SIZE);
        self.moved_by(dx, dy)
    }

    /// Whether the position lies inside the half-open arena `[0, ARENA_SIZE)`
    pub fn is_in_arena(&self) -> bool {
        self.x >= 0 && self.x < ARENA_SIZE && self.y >= 0 && self.y < ARENA_SIZE
    }

    /// Column and row of the cell containing this position
    pub fn cell(&self) -> (i32, i32) {
        (self.x.div_euclid(CELL_SIZE), self.y.div_euclid(CELL_SIZE))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction used by the most recent move
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta(CELL_SIZE);
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Prepend a new head, keeping the tail when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

impl CollisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionType::Wall => "wall",
            CollisionType::SelfCollision => "self",
        }
    }
}

/// Lifecycle of one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created and drawn, waiting for the start command
    Idle,
    /// Ticking
    Running,
    /// Terminal condition reached
    Over,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction requested since the last tick, applied by the next one
    pub pending_direction: Option<Direction>,
    pub fruit: Fruit,
    pub score: u32,
    pub fruits_eaten: u32,
    pub ticks: u32,
    /// Current tick interval
    pub interval: Duration,
    pub phase: Phase,
    /// Fin bonus flag; cleared by the host's real-time timer
    pub bonus_active: bool,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(snake: Snake, fruit: Fruit, interval: Duration) -> Self {
        Self {
            snake,
            pending_direction: None,
            fruit,
            score: 0,
            fruits_eaten: 0,
            ticks: 0,
            interval,
            phase: Phase::Idle,
            bonus_active: false,
        }
    }

    /// Check if a position is within the arena
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_in_arena()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fruit::FruitKind;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_by(20, 0), Position::new(120, 100));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(100, 80));
    }

    #[test]
    fn test_position_cell() {
        assert_eq!(Position::new(0, 0).cell(), (0, 0));
        assert_eq!(Position::new(580, 40).cell(), (29, 2));
        assert_eq!(Position::new(-20, 600).cell(), (-1, 30));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(160, 200), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(160, 200));
        assert_eq!(snake.body[1], Position::new(140, 200));
        assert_eq!(snake.tail(), Position::new(120, 200));
    }

    #[test]
    fn test_snake_never_empty() {
        let snake = Snake::new(Position::new(0, 0), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(160, 200), Direction::Right, 3);

        snake.advance(Position::new(180, 200), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(180, 200));
        assert_eq!(snake.tail(), Position::new(140, 200));

        snake.advance(Position::new(200, 200), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(140, 200));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(160, 200), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(160, 200))); // head
        assert!(snake.collides_with_body(Position::new(140, 200))); // body
        assert!(!snake.collides_with_body(Position::new(300, 300))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(160, 200), Direction::Right, 3),
            Fruit::new(Position::new(300, 300), FruitKind::Apple),
            Duration::from_millis(200),
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(580, 580)));
        assert!(!state.is_in_bounds(Position::new(-20, 0)));
        assert!(!state.is_in_bounds(Position::new(600, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 600)));
        assert!(state.is_occupied_by_snake(Position::new(120, 200)));
        assert_eq!(state.phase, Phase::Idle);
    }
}
