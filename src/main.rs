//! veracity-console: simulated truth meter and device marketplace
//!
//! Runs two unrelated experiences in one terminal session:
//! - A "lie detector" dashboard whose confidence value and behavioral
//!   indicators are driven by a seeded random walk, next to a simulated
//!   camera/microphone capture stream
//! - A marketplace browser over six fixed listings with filtering,
//!   sorting and a detail view
//!
//! Nothing is analyzed, persisted or sent over a network.

mod capture;
mod catalog;
mod config;
mod console;
mod events;
mod lifecycle;
mod scheduler;
mod signal;
mod state;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::capture::{CaptureLifecycle, MediaConstraints, SimulatedSource};
use crate::catalog::MarketplaceView;
use crate::config::Config;
use crate::console::{Console, LineReader};
use crate::events::DashboardEvent;
use crate::lifecycle::ShutdownSignal;
use crate::state::{Dashboard, DashboardController};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries console output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "veracity-console starting"
    );

    let config = Config::load()?;
    info!(
        tick_ms = config.tick_interval.as_millis() as u64,
        seed = ?config.seed,
        reset_policy = ?config.reset_policy,
        camera = ?config.camera,
        "configuration loaded"
    );

    let mut shutdown = ShutdownSignal::new()?;

    // Console -> controller
    let (command_tx, command_rx) = mpsc::channel(32);
    // Controller -> console
    let (event_tx, event_rx) = broadcast::channel::<DashboardEvent>(64);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let constraints = MediaConstraints {
        facing_mode: config.facing,
        ..MediaConstraints::default()
    };
    let capture = CaptureLifecycle::new(SimulatedSource::new(config.camera))
        .with_constraints(constraints)
        .with_observer(|stream| {
            info!(stream_id = stream.id(), "capture stream ready for display");
        });

    let mut controller = DashboardController::new(
        Dashboard::new(config.reset_policy),
        config.tick_interval,
        capture,
        rng,
        event_tx,
    );
    let controller_task = tokio::spawn(async move {
        controller.run(command_rx).await;
        controller
    });

    // Stdin reader thread -> console
    let (line_tx, line_rx) = mpsc::channel(32);
    let reader = LineReader::new(line_tx);
    if let Err(e) = reader.start() {
        error!(?e, "failed to start console reader");
    }

    let mut console = Console::new(MarketplaceView::default(), command_tx, event_rx, config.output);

    info!("initialized, type 'help' for commands");

    tokio::select! {
        // Read commands until EOF or quit; replies and notices share stdout
        result = console.run(line_rx, tokio::io::stdout()) => {
            if let Err(e) = result {
                error!(?e, "console error");
            }
        }

        // Wait for shutdown signal
        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    info!("shutting down...");
    reader.stop();

    // Closing the command channel lets the controller finish what is queued,
    // then it halts and releases capture
    drop(console);
    match controller_task.await {
        Ok(controller) => drop(controller),
        Err(e) => error!(?e, "dashboard controller task failed"),
    }

    info!("veracity-console stopped");

    Ok(())
}
