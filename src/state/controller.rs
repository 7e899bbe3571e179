//! Dashboard controller loop
//!
//! Owns the dashboard, the tick scheduler, the capture stream and the rng.
//! All mutation happens on this loop, so disarming the ticker inside a
//! command handler guarantees no further tick is applied.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::capture::{CaptureDisplay, CaptureLifecycle, MediaSource};
use crate::events::DashboardEvent;
use crate::scheduler::Ticker;

use super::machine::{Dashboard, DashboardSnapshot};

/// Where the controller sends the status once a command is applied
pub type StatusReply = oneshot::Sender<DashboardStatus>;

/// Requests handled by the controller. Each one is answered with the
/// status after it was applied.
#[derive(Debug)]
pub enum DashboardCommand {
    Start(StatusReply),
    Stop(StatusReply),
    Reset(StatusReply),
    Snapshot(StatusReply),
}

/// Dashboard snapshot plus what the video panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStatus {
    #[serde(flatten)]
    pub dashboard: DashboardSnapshot,
    pub capture: CaptureDisplay,
}

/// Runs the dashboard state machine against a periodic ticker
pub struct DashboardController<S: MediaSource, R: Rng> {
    dashboard: Dashboard,
    ticker: Ticker,
    period: Duration,
    capture: CaptureLifecycle<S>,
    rng: R,
    event_tx: broadcast::Sender<DashboardEvent>,
}

impl<S: MediaSource, R: Rng> DashboardController<S, R> {
    pub fn new(
        dashboard: Dashboard,
        period: Duration,
        capture: CaptureLifecycle<S>,
        rng: R,
        event_tx: broadcast::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            dashboard,
            ticker: Ticker::new(),
            period,
            capture,
            rng,
            event_tx,
        }
    }

    #[cfg(test)]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn status(&self) -> DashboardStatus {
        DashboardStatus {
            dashboard: self.dashboard.snapshot(),
            capture: self.capture.display(),
        }
    }

    /// Process commands and ticks until the command channel closes
    pub async fn run(&mut self, mut command_rx: mpsc::Receiver<DashboardCommand>) {
        info!(period_ms = self.period.as_millis() as u64, "dashboard controller started");

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                _ = self.ticker.tick() => self.on_tick(),
            }
        }

        self.halt();
        info!("dashboard controller stopped");
    }

    /// Apply a single command
    pub async fn handle(&mut self, command: DashboardCommand) {
        debug!(?command, "dashboard command");

        let reply = match command {
            DashboardCommand::Start(reply) => {
                if let Some(event) = self.dashboard.start() {
                    self.ticker.arm(self.period);
                    self.emit(event);
                    self.activate_capture().await;
                }
                reply
            }
            DashboardCommand::Stop(reply) => {
                if let Some(event) = self.dashboard.stop() {
                    self.halt();
                    self.emit(event);
                }
                reply
            }
            DashboardCommand::Reset(reply) => {
                let events = self.dashboard.reset();
                if !self.dashboard.is_active() {
                    self.halt();
                }
                for event in events {
                    self.emit(event);
                }
                reply
            }
            DashboardCommand::Snapshot(reply) => reply,
        };

        // Events are already on the broadcast channel when the reply lands
        if reply.send(self.status()).is_err() {
            debug!("command sender went away before the reply");
        }
    }

    /// Apply one tick; exposed for single-stepping
    pub fn on_tick(&mut self) {
        if let Some(event) = self.dashboard.tick(&mut self.rng) {
            self.emit(event);
        }
    }

    async fn activate_capture(&mut self) {
        match self.capture.activate().await {
            Ok(()) => {
                let stream_id = self.capture.stream().map(|s| s.id()).unwrap_or_default();
                self.emit(DashboardEvent::CaptureStarted { stream_id });
            }
            Err(e) => self.emit(DashboardEvent::CaptureFailed {
                reason: e.to_string(),
            }),
        }
    }

    /// Disarm the ticker and release the capture stream
    fn halt(&mut self) {
        self.ticker.disarm();
        if self.capture.stream().is_some() {
            self.capture.deactivate();
            self.emit(DashboardEvent::CaptureStopped);
        }
    }

    fn emit(&self, event: DashboardEvent) {
        debug!(%event, "emitting dashboard event");
        let _ = self.event_tx.send(event);
    }
}
