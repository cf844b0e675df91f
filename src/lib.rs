//! Fruit Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Tick and bonus timers (timing module)
//! - TUI rendering and input mapping (render, input modules)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod timing;
