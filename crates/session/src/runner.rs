//! Session runner - the tick source and command loop.

use std::time::Duration;

use async_trait::async_trait;
use ratehue_core::{CoreError, SessionConfig};
use ratehue_progress::RateSnapshot;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::controller::{Frame, SessionController, SessionState};

/// Errors that end a running session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The renderer could not draw a frame
    #[error("render error: {0}")]
    Render(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Draws frames. Implementations may animate between colors on their own.
#[async_trait]
pub trait FrameRenderer: Send {
    /// Draw one frame.
    async fn render(&mut self, frame: &Frame) -> Result<(), SessionError>;
}

/// Control input for a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin (or resume) ticking
    Start,
    /// Stop ticking, keep counters
    Pause,
    /// Zero counters and show the start color
    Reset,
    /// Add completed units
    Add(i64),
    /// Change the hourly rate
    SetRate(u32),
    /// End the run
    Shutdown,
}

/// Configuration for the runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Time between ticks
    pub tick_interval: Duration,
    /// Ticks before stopping (None = until shutdown)
    pub max_ticks: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            max_ticks: None,
        }
    }
}

impl From<&SessionConfig> for RunnerConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            max_ticks: None,
        }
    }
}

/// Drives a [`SessionController`] from an interval timer and a command channel.
///
/// The runner's task is the only place the controller is touched, so ticks,
/// increments and color reads never interleave.
pub struct SessionRunner<R: FrameRenderer> {
    controller: SessionController,
    renderer: R,
    commands: mpsc::Receiver<Command>,
    config: RunnerConfig,
    ticks_run: u64,
}

impl<R: FrameRenderer> SessionRunner<R> {
    /// Create a runner.
    pub fn new(controller: SessionController, renderer: R, commands: mpsc::Receiver<Command>) -> Self {
        Self {
            controller,
            renderer,
            commands,
            config: RunnerConfig::default(),
            ticks_run: 0,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run until shutdown, until every sender is dropped, or until
    /// `max_ticks` ticks have been handled. Returns the final figures.
    pub async fn run(&mut self) -> Result<RateSnapshot, SessionError> {
        let setup = self.controller.setup();
        self.renderer.render(&setup).await?;

        let mut ticker = interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if let Some(max) = self.config.max_ticks {
                if self.ticks_run >= max {
                    info!("Reached max ticks ({})", max);
                    break;
                }
            }

            let running = self.controller.state() == SessionState::Running;
            tokio::select! {
                _ = ticker.tick(), if running => {
                    if let Some(frame) = self.controller.on_tick() {
                        self.ticks_run += 1;
                        self.renderer.render(&frame).await?;
                    }
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("Command channel closed");
                        break;
                    };
                    if !self.handle(command, &mut ticker).await? {
                        break;
                    }
                }
            }
        }

        Ok(self.controller.snapshot())
    }

    /// Apply one command. Returns `false` when the run should end.
    async fn handle(&mut self, command: Command, ticker: &mut tokio::time::Interval) -> Result<bool, SessionError> {
        debug!(?command, "Handling command");
        match command {
            Command::Start => {
                self.controller.start();
                // The first tick lands as soon as the session starts.
                ticker.reset_immediately();
            }
            Command::Pause => self.controller.pause(),
            Command::Reset => {
                let frame = self.controller.reset();
                self.renderer.render(&frame).await?;
            }
            Command::Add(count) => self.controller.add_completed(count),
            Command::SetRate(rate) => self.controller.configure(rate),
            Command::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    /// Ticks handled so far.
    pub fn ticks(&self) -> u64 {
        self.ticks_run
    }

    /// The controller.
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
