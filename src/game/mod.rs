//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive it one tick at a time and draw the snapshots it hands back.

pub mod action;
pub mod config;
pub mod engine;
pub mod fruit;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, Variant, VariantRules};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use fruit::{Fruit, FruitKind};
pub use snapshot::{Segment, SegmentRole, Snapshot};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
