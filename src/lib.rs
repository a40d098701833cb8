//! Classic grid snake for the terminal
//!
//! This library provides:
//! - Core game logic (game module): movement, pellet placement, collisions
//! - Key-to-command mapping (input module)
//! - TUI rendering (render module)
//! - Synthesized sound cues (audio module)
//! - Session stats for the header (metrics module)
//! - The game-loop controller gluing them together (app module)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
