//! Core dashboard state machine
//!
//! Holds the analysis flag, the confidence value and the four indicators.
//! State changes only through `start`, `stop`, `reset` and `tick`; each
//! returns the events it produced so the owner can publish them.

use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::events::DashboardEvent;
use crate::signal::{
    Classification, IndicatorKind, IndicatorSet, MeterReading, SignalGenerator,
    RESTING_CONFIDENCE,
};

/// What `reset` does while analysis is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Reset values and keep ticking, leaving the timer alone
    #[default]
    KeepRunning,
    /// Stop analysis, then reset
    StopAnalysis,
    /// Refuse the reset until analysis is stopped, like a reset control
    /// that is disabled during analysis
    Reject,
}

impl FromStr for ResetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "keep_running" | "keep" => Ok(ResetPolicy::KeepRunning),
            "stop_analysis" | "stop" => Ok(ResetPolicy::StopAnalysis),
            "reject" => Ok(ResetPolicy::Reject),
            other => Err(format!("unknown reset policy '{}'", other)),
        }
    }
}

/// One indicator as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReading {
    pub kind: IndicatorKind,
    pub label: &'static str,
    pub status: Classification,
}

/// Serializable view of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub active: bool,
    pub confidence: f64,
    pub meter: MeterReading,
    pub indicators: Vec<IndicatorReading>,
    /// Ticks applied in the current (or last) session
    pub ticks: u64,
}

/// The dashboard state
#[derive(Debug, Clone)]
pub struct Dashboard {
    active: bool,
    confidence: f64,
    indicators: IndicatorSet,
    generator: SignalGenerator,
    reset_policy: ResetPolicy,
    ticks: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(ResetPolicy::default())
    }
}

impl Dashboard {
    /// Create an inactive dashboard at its defaults
    pub fn new(reset_policy: ResetPolicy) -> Self {
        Self {
            active: false,
            confidence: RESTING_CONFIDENCE,
            indicators: IndicatorSet::default(),
            generator: SignalGenerator::new(),
            reset_policy,
            ticks: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stored confidence (frozen while inactive)
    #[cfg(test)]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    #[cfg(test)]
    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// Begin analysis. A new session walks from the resting value.
    pub fn start(&mut self) -> Option<DashboardEvent> {
        if self.active {
            debug!("start ignored, analysis already running");
            return None;
        }

        self.active = true;
        self.confidence = RESTING_CONFIDENCE;
        self.ticks = 0;
        info!("analysis started");
        Some(DashboardEvent::AnalysisStarted)
    }

    /// End analysis, freezing the current values
    pub fn stop(&mut self) -> Option<DashboardEvent> {
        if !self.active {
            debug!("stop ignored, analysis not running");
            return None;
        }

        self.active = false;
        info!(
            confidence = self.confidence,
            ticks = self.ticks,
            "analysis stopped"
        );
        Some(DashboardEvent::AnalysisStopped { ticks: self.ticks })
    }

    /// Return confidence and indicators to their defaults, honoring the
    /// reset policy when analysis is running.
    pub fn reset(&mut self) -> Vec<DashboardEvent> {
        let mut events = Vec::new();

        if self.active {
            match self.reset_policy {
                ResetPolicy::KeepRunning => {}
                ResetPolicy::StopAnalysis => events.extend(self.stop()),
                ResetPolicy::Reject => {
                    warn!("reset rejected while analysis is running");
                    events.push(DashboardEvent::ResetRejected);
                    return events;
                }
            }
        }

        self.confidence = RESTING_CONFIDENCE;
        self.indicators = IndicatorSet::default();
        info!(policy = ?self.reset_policy, "indicators reset");
        events.push(DashboardEvent::ResetComplete);
        events
    }

    /// Apply one analysis tick. Does nothing while inactive.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<DashboardEvent> {
        if !self.active {
            return None;
        }

        self.confidence = self
            .generator
            .step(rng, self.confidence, &mut self.indicators);
        self.ticks += 1;
        Some(DashboardEvent::Tick(self.snapshot()))
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            active: self.active,
            confidence: self.confidence,
            meter: MeterReading::new(self.confidence, self.active),
            indicators: self
                .indicators
                .iter()
                .map(|indicator| IndicatorReading {
                    kind: indicator.kind,
                    label: indicator.label,
                    status: indicator.classification(),
                })
                .collect(),
            ticks: self.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::signal::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};

    fn running(policy: ResetPolicy) -> (Dashboard, StdRng) {
        let mut dashboard = Dashboard::new(policy);
        dashboard.start();
        (dashboard, StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_initial_state() {
        let dashboard = Dashboard::default();
        assert!(!dashboard.is_active());
        assert_eq!(dashboard.confidence(), 50.0);
        assert_eq!(dashboard.indicators(), &IndicatorSet::default());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut dashboard = Dashboard::default();
        assert!(matches!(dashboard.start(), Some(DashboardEvent::AnalysisStarted)));
        assert!(dashboard.start().is_none());
        assert!(dashboard.is_active());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.stop().is_none());
    }

    #[test]
    fn test_ticks_stay_in_bounds() {
        let (mut dashboard, mut rng) = running(ResetPolicy::default());
        for _ in 0..5_000 {
            dashboard.tick(&mut rng);
            let confidence = dashboard.confidence();
            assert!((CONFIDENCE_FLOOR..=CONFIDENCE_CEILING).contains(&confidence));
        }
    }

    #[test]
    fn test_inactive_tick_is_noop() {
        let mut dashboard = Dashboard::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(dashboard.tick(&mut rng).is_none());
        assert_eq!(dashboard.confidence(), 50.0);
    }

    #[test]
    fn test_stop_freezes_value() {
        let (mut dashboard, mut rng) = running(ResetPolicy::default());
        for _ in 0..20 {
            dashboard.tick(&mut rng);
        }
        let frozen = dashboard.confidence();

        let event = dashboard.stop();
        assert!(matches!(event, Some(DashboardEvent::AnalysisStopped { ticks: 20 })));
        for _ in 0..20 {
            assert!(dashboard.tick(&mut rng).is_none());
        }
        assert_eq!(dashboard.confidence(), frozen);

        // The gauge rests while inactive, and the next session walks from 50.
        assert_eq!(dashboard.snapshot().meter.display, 50.0);
        dashboard.start();
        assert_eq!(dashboard.confidence(), 50.0);
    }

    #[test]
    fn test_reset_keep_running() {
        let (mut dashboard, mut rng) = running(ResetPolicy::KeepRunning);
        for _ in 0..10 {
            dashboard.tick(&mut rng);
        }

        let events = dashboard.reset();
        assert!(matches!(events.as_slice(), [DashboardEvent::ResetComplete]));
        assert!(dashboard.is_active());
        assert_eq!(dashboard.confidence(), 50.0);
        assert_eq!(dashboard.indicators(), &IndicatorSet::default());
        assert!(dashboard.tick(&mut rng).is_some());
    }

    #[test]
    fn test_reset_stop_analysis() {
        let (mut dashboard, mut rng) = running(ResetPolicy::StopAnalysis);
        dashboard.tick(&mut rng);

        let events = dashboard.reset();
        assert!(matches!(
            events.as_slice(),
            [DashboardEvent::AnalysisStopped { ticks: 1 }, DashboardEvent::ResetComplete]
        ));
        assert!(!dashboard.is_active());
        assert_eq!(dashboard.confidence(), 50.0);
    }

    #[test]
    fn test_reset_reject() {
        let (mut dashboard, mut rng) = running(ResetPolicy::Reject);
        for _ in 0..10 {
            dashboard.tick(&mut rng);
        }
        let before = dashboard.confidence();

        let events = dashboard.reset();
        assert!(matches!(events.as_slice(), [DashboardEvent::ResetRejected]));
        assert_eq!(dashboard.confidence(), before);

        dashboard.stop();
        let events = dashboard.reset();
        assert!(matches!(events.as_slice(), [DashboardEvent::ResetComplete]));
        assert_eq!(dashboard.confidence(), 50.0);
    }

    #[test]
    fn test_snapshot_classifies_indicators() {
        let snapshot = Dashboard::default().snapshot();
        let statuses: Vec<_> = snapshot.indicators.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![
                Classification::Affirmative,
                Classification::Affirmative,
                Classification::Affirmative,
                Classification::Neutral,
            ]
        );
    }

    #[test]
    fn test_same_seed_same_session() {
        let session = || {
            let (mut dashboard, mut rng) = running(ResetPolicy::default());
            let mut snapshots = Vec::new();
            for _ in 0..30 {
                dashboard.tick(&mut rng);
                snapshots.push(dashboard.snapshot());
            }
            snapshots
        };
        assert_eq!(session(), session());
    }

    #[test]
    fn test_reset_policy_parsing() {
        assert_eq!("keep-running".parse::<ResetPolicy>(), Ok(ResetPolicy::KeepRunning));
        assert_eq!("STOP".parse::<ResetPolicy>(), Ok(ResetPolicy::StopAnalysis));
        assert_eq!("reject".parse::<ResetPolicy>(), Ok(ResetPolicy::Reject));
        assert!("sometimes".parse::<ResetPolicy>().is_err());
    }
}
