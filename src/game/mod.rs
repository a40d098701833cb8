//! Core game logic module for Snake
//!
//! Everything here is pure simulation with no I/O or rendering
//! dependencies; the app drives it from the event loop.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{TickEngine, TickOutcome};
pub use state::{GameOverCause, GameState, Position, Snake};
