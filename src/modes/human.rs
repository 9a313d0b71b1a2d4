use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::timer::TickTimer;

/// Keyboard-driven game in the terminal
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    needs_redraw: bool,
}

type StderrTerminal = Terminal<CrosstermBackend<Stderr>>;

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            engine: GameEngine::new(config)?,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            needs_redraw: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = setup_or_restore(setup_terminal, restore_terminal)?;

        info!(
            grid_size = self.engine.config().grid_size,
            tick_ms = self.engine.config().tick_interval_ms,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut StderrTerminal) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_period = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = TickTimer::start(tick_period);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                Some(()) = tick_timer.tick() => {
                    self.on_tick();
                }

                // Render frame, only when something on screen changed
                _ = render_timer.tick() => {
                    let shown_time = self.metrics.format_time();
                    self.metrics.update();
                    if self.needs_redraw || self.metrics.format_time() != shown_time {
                        terminal.draw(|frame| {
                            self.renderer.render(frame, self.engine.state(), &self.metrics);
                        }).context("Failed to draw frame")?;
                        self.needs_redraw = false;
                    }
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

        tick_timer.cancel();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);
                self.apply(action);
            }
            Event::Resize(..) => self.needs_redraw = true,
            _ => {}
        }
    }

    /// Apply a key action to the game
    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.engine.set_direction(direction) {
                    debug!(?direction, "turn ignored after game over");
                }
            }
            KeyAction::Confirm => {
                if self.engine.is_game_over() {
                    self.engine.reset();
                    self.metrics.on_game_start();
                    self.needs_redraw = true;
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Advance the engine and mark the frame dirty when the board moved
    fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();
        if outcome.changed() {
            self.needs_redraw = true;
        }

        if let TickOutcome::Collided { .. } = outcome {
            let state = self.engine.state();
            self.metrics.on_game_over(state.score, state.snake.len());
            info!(
                score = state.score,
                high_score = self.metrics.high_score,
                games_played = self.metrics.games_played,
                "game over"
            );
        }

        outcome
    }

    fn cleanup_terminal(&mut self, terminal: &mut StderrTerminal) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn setup_terminal() -> Result<StderrTerminal> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort undo of a half-finished setup; errors here are dropped
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stderr(), LeaveAlternateScreen, Show);
}

/// Run `setup`, calling `restore` before handing back any error
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}
