use serde::{Deserialize, Serialize};

use super::state::Position;

/// Configuration for the game
///
/// Defaults mirror the classic board: a 35x25 grid, the snake starting near
/// the top-left corner, one simulation step every 100ms. Board geometry is
/// fixed at build time and not exposed on the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Cell column the snake occupies at the start of a round
    pub start_x: i32,
    /// Cell row the snake occupies at the start of a round
    pub start_y: i32,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 35,
            grid_height: 25,
            start_x: 2,
            start_y: 2,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// The snake's starting cell
    pub fn start_cell(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 35);
        assert_eq!(config.grid_height, 25);
        assert_eq!(config.start_cell(), Position::new(2, 2));
        assert_eq!(config.tick_interval_ms, 100);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::small();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.tick_interval_ms, 100);
    }
}
