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
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::config::{BONUS_DURATION, GAME_OVER_DELAY};
use crate::game::{GameConfig, GameEngine, GameState, Phase, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Effects, Overlay, Renderer};
use crate::timing::{Deadline, TickScheduler};

/// Timers owned by the session loop
struct SessionTimers {
    ticker: TickScheduler,
    bonus: Deadline,
    report: Deadline,
}

impl SessionTimers {
    fn new(period: Duration) -> Self {
        Self {
            ticker: TickScheduler::new(period),
            bonus: Deadline::new(),
            report: Deadline::new(),
        }
    }
}

/// Keyboard-driven game in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    snapshot: Snapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    effects: Effects,
    should_quit: bool,
    report_ready: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.variant.rules().catalog);
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            snapshot: state.snapshot(),
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            effects: Effects::new(),
            should_quit: false,
            report_ready: false,
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
        let mut timers = SessionTimers::new(self.state.interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut timers),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = timers.ticker.tick() => {
                    self.on_tick(&mut timers);
                }

                _ = timers.bonus.expired() => {
                    self.on_bonus_expired();
                }

                _ = timers.report.expired() => {
                    self.report_ready = true;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.effects.advance_frame();
                    let overlay = self.overlay();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.snapshot, &self.metrics, &self.effects, overlay);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit with score {}", self.state.score);
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, timers: &mut SessionTimers) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    // Ignored unless running
                    self.engine.set_direction(&mut self.state, direction);
                }
                KeyAction::Start => self.start_game(timers),
                KeyAction::Restart => self.reset_game(timers),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn start_game(&mut self, timers: &mut SessionTimers) {
        if !self.engine.start(&mut self.state) {
            return;
        }

        self.metrics.on_game_start();
        timers.ticker.reschedule(self.state.interval);
        timers.ticker.start();
        self.snapshot = self.state.snapshot();
    }

    fn on_tick(&mut self, timers: &mut SessionTimers) {
        let result = self.engine.step(&mut self.state);
        self.snapshot = result.snapshot;

        if result.info.ate_fruit.is_some() {
            self.effects.on_fruit_eaten(Instant::now());
        }

        if let Some(period) = result.info.new_interval {
            timers.ticker.reschedule(period);
        }

        if result.info.bonus_activated {
            timers.bonus.arm(BONUS_DURATION);
        }

        if result.terminated {
            self.finish_game(timers);
        }
    }

    fn finish_game(&mut self, timers: &mut SessionTimers) {
        timers.ticker.stop();
        timers.bonus.disarm();
        timers.report.arm(GAME_OVER_DELAY);

        // Fins fall off with the game
        self.engine.expire_bonus(&mut self.state);
        self.snapshot = self.state.snapshot();

        self.metrics.on_game_over(self.state.score);
        self.effects
            .explode(self.state.snake.head(), &mut rand::thread_rng());

        info!(
            "Final score {} with {} fruits collected in {}",
            self.state.score,
            self.state.fruits_eaten,
            self.metrics.format_time()
        );
    }

    fn on_bonus_expired(&mut self) {
        self.engine.expire_bonus(&mut self.state);
        self.snapshot = self.state.snapshot();
    }

    fn reset_game(&mut self, timers: &mut SessionTimers) {
        self.state = self.engine.reset();
        self.snapshot = self.state.snapshot();

        timers.ticker.stop();
        timers.ticker.reschedule(self.state.interval);
        timers.bonus.disarm();
        timers.report.disarm();

        self.effects.clear();
        self.metrics.on_reset();
        self.report_ready = false;
        info!("Board reset");
    }

    fn overlay(&self) -> Overlay {
        match self.state.phase {
            Phase::Idle => Overlay::StartPrompt,
            Phase::Over if self.report_ready => Overlay::Report,
            _ => Overlay::None,
        }
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
