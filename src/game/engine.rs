use rand::Rng;

use super::{
    config::GameConfig,
    state::{GameOverCause, GameState, Position, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake collected the pellet this tick
    pub ate_pellet: bool,
    /// Set when this tick ended the round
    pub game_over: Option<GameOverCause>,
}

/// The engine advancing the simulation one tick at a time
pub struct TickEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl TickEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state: a single-segment snake at the start cell
    /// and one pellet somewhere else
    pub fn new_round(&mut self) -> GameState {
        let snake = Snake::new(self.config.start_cell());
        let pellet = self.spawn_pellet(&snake);
        GameState::new(snake, pellet, self.config.grid_width, self.config.grid_height)
    }

    /// Reset a finished round for another go; the high score carries over
    pub fn restart(&mut self, state: &mut GameState) {
        let high_score = state.high_score;
        *state = self.new_round();
        state.high_score = high_score;
    }

    /// Advance the simulation by one tick.
    ///
    /// Clears the steer latch, moves the snake one cell along its heading,
    /// handles pellet pickup and respawn, then checks self-collision and
    /// bounds. The self-collision check is skipped on the tick a pellet was
    /// eaten, matching the stacked-tail growth.
    pub fn step(&mut self, state: &mut GameState) -> TickOutcome {
        const INERT: TickOutcome = TickOutcome {
            ate_pellet: false,
            game_over: None,
        };

        // paused, not yet started, or already over
        if !state.is_running() {
            return INERT;
        }

        state.steer_latched = false;

        let Some(heading) = state.heading else {
            // started without a steer; nothing to advance
            return INERT;
        };

        let new_head = state.snake.head().moved_in_direction(heading);
        let ate_pellet = new_head == state.pellet;

        state.snake.advance(new_head, ate_pellet);
        state.score = state.snake.len() as u32;

        if ate_pellet {
            state.pellet = self.spawn_pellet(&state.snake);
        }

        let game_over = if !state.is_in_bounds(new_head) {
            Some(GameOverCause::Wall)
        } else if !ate_pellet && state.snake.collides_with_body(new_head) {
            Some(GameOverCause::SelfCollision)
        } else {
            None
        };

        if game_over.is_some() {
            self.finish_round(state);
        }

        TickOutcome {
            ate_pellet,
            game_over,
        }
    }

    /// End the round: freeze the simulation and settle the high score.
    /// has_started stays set so Space means "restart" from here on.
    fn finish_round(&self, state: &mut GameState) {
        state.is_active = false;
        state.steer_latched = false;
        state.high_score = state.high_score.max(state.score);
    }

    /// Spawn a pellet at a uniformly random cell not occupied by the snake
    fn spawn_pellet(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
