//! Timers driving a game session
//!
//! [`TickScheduler`] is the recurring tick source whose period changes as
//! the snake speeds up. [`Deadline`] is a one-shot real-time timer, used for
//! the fin bonus expiry and the pause before the game-over report.

pub mod deadline;
pub mod ticker;

pub use deadline::Deadline;
pub use ticker::TickScheduler;
