use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{SoundCue, SoundPlayer};
use crate::game::{GameConfig, GameState, TickEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// The game-loop controller.
///
/// Owns the game state and every collaborator, and multiplexes input
/// events, the simulation tick, and the render timer on one select loop,
/// so no two handlers ever run concurrently.
pub struct App {
    engine: TickEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: SoundPlayer,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, audio: SoundPlayer) -> Self {
        let mut engine = TickEngine::new(config);
        let state = engine.new_round();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; gated off while paused, before the first
                // steer, and after game over
                _ = tick_timer.tick() => {
                    if self.state.is_running() {
                        self.tick();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.is_running() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_key_action(action);
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                let was_started = self.state.has_started;
                if self.state.try_steer(direction) && !was_started {
                    // first steer of the round arms the clock
                    self.state.begin_round();
                    self.metrics.on_game_start();
                    info!("round started, heading {:?}", direction);
                }
            }
            KeyAction::PauseOrRestart => {
                if self.state.is_active {
                    self.state.is_paused = !self.state.is_paused;
                    info!(
                        "{}",
                        if self.state.is_paused { "paused" } else { "resumed" }
                    );
                } else if self.state.has_started {
                    self.restart();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn tick(&mut self) {
        let outcome = self.engine.step(&mut self.state);

        if outcome.ate_pellet {
            self.audio.play(SoundCue::PelletCollected);
        }

        if let Some(cause) = outcome.game_over {
            self.audio.play(SoundCue::GameOver);
            self.metrics.on_game_over();
            info!(
                "game over ({:?}), length {}, high score {}",
                cause, self.state.score, self.state.high_score
            );
        }
    }

    fn restart(&mut self) {
        self.engine.restart(&mut self.state);
        self.metrics.on_game_start();
        info!("restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn test_app() -> App {
        App::new(GameConfig::default(), SoundPlayer::muted())
    }

    #[test]
    fn test_initialization() {
        let app = test_app();
        assert!(!app.state.has_started);
        assert!(!app.state.is_active);
        assert_eq!(app.state.score, 1);
    }

    #[test]
    fn test_first_steer_starts_round() {
        let mut app = test_app();

        app.apply_key_action(KeyAction::Steer(Direction::Right));

        assert!(app.state.has_started);
        assert!(app.state.is_active);
        assert!(app.state.is_running());
        assert_eq!(app.state.heading, Some(Direction::Right));
    }

    #[test]
    fn test_space_before_start_does_nothing() {
        let mut app = test_app();

        app.apply_key_action(KeyAction::PauseOrRestart);

        assert!(!app.state.has_started);
        assert!(!app.state.is_paused);
    }

    #[test]
    fn test_space_toggles_pause_while_active() {
        let mut app = test_app();
        app.apply_key_action(KeyAction::Steer(Direction::Right));

        app.apply_key_action(KeyAction::PauseOrRestart);
        assert!(app.state.is_paused);
        assert!(!app.state.is_running());

        app.apply_key_action(KeyAction::PauseOrRestart);
        assert!(!app.state.is_paused);
        assert!(app.state.is_running());
    }

    #[test]
    fn test_space_restarts_after_game_over() {
        let mut app = test_app();
        app.apply_key_action(KeyAction::Steer(Direction::Right));
        app.state.score = 5;
        app.state.high_score = 5;
        app.state.is_active = false;

        app.apply_key_action(KeyAction::PauseOrRestart);

        assert!(!app.state.has_started);
        assert!(!app.state.is_active);
        assert_eq!(app.state.heading, None);
        assert_eq!(app.state.score, 1);
        assert_eq!(app.state.high_score, 5);
    }

    #[test]
    fn test_steering_latches_until_next_tick() {
        let mut app = test_app();
        app.apply_key_action(KeyAction::Steer(Direction::Right));
        app.apply_key_action(KeyAction::Steer(Direction::Down));
        assert_eq!(app.state.heading, Some(Direction::Right));

        // keep clear of the pellet so the tick is a plain move
        app.state.pellet = crate::game::Position::new(20, 20);
        app.tick();

        app.apply_key_action(KeyAction::Steer(Direction::Down));
        assert_eq!(app.state.heading, Some(Direction::Down));
    }

    #[test]
    fn test_quit_action() {
        let mut app = test_app();
        app.apply_key_action(KeyAction::Quit);
        assert!(app.should_quit);
    }
}
