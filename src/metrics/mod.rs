//! Session statistics shown in the header: round timer and rounds played.

use std::time::{Duration, Instant};

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
        }
    }

    /// Refresh the elapsed-time reading; call while the round is running so
    /// the display freezes during pauses and between rounds
    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.rounds_played += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
