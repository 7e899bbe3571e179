//! Armable interval used to drive analysis ticks

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// A periodic tick source that can be armed and disarmed
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
    fired: u64,
}

impl Ticker {
    /// Create a disarmed ticker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`, first tick one period from now.
    ///
    /// Re-arming an armed ticker restarts its phase.
    pub fn arm(&mut self, period: Duration) {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!(period_ms = period.as_millis() as u64, "ticker armed");
    }

    /// Stop ticking. Safe to call when already disarmed.
    pub fn disarm(&mut self) {
        if self.interval.take().is_some() {
            debug!(fired = self.fired, "ticker disarmed");
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Number of ticks delivered since creation
    #[cfg(test)]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Wait for the next tick; pends forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
                self.fired += 1;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
