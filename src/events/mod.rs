//! Events module for dashboard transitions
//!
//! Every transition of the dashboard and of the capture stream is published
//! as a structured event. The console turns them into notices.

use serde::Serialize;

use crate::state::DashboardSnapshot;

/// Events emitted by the dashboard controller
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Analysis switched on
    AnalysisStarted,

    /// Analysis switched off
    AnalysisStopped {
        /// How many ticks ran during this session
        ticks: u64,
    },

    /// Confidence and indicators went back to their defaults
    ResetComplete,

    /// Reset was requested while analysis was running and refused
    ResetRejected,

    /// One analysis tick was applied
    Tick(DashboardSnapshot),

    /// Capture stream bound for display
    CaptureStarted {
        stream_id: u64,
    },

    /// Capture stream released
    CaptureStopped,

    /// Capture stream could not be acquired
    CaptureFailed {
        reason: String,
    },
}

impl DashboardEvent {
    /// Title and description shown to the operator, if any
    pub fn notice(&self) -> Option<(&'static str, &'static str)> {
        match self {
            DashboardEvent::AnalysisStarted => Some((
                "Analysis Started",
                "Now monitoring facial expressions, voice patterns, and body language.",
            )),
            DashboardEvent::AnalysisStopped { .. } => Some((
                "Analysis Stopped",
                "Recording saved. You can review the results.",
            )),
            DashboardEvent::ResetComplete => {
                Some(("Reset Complete", "All indicators have been reset."))
            }
            DashboardEvent::ResetRejected => {
                Some(("Reset Unavailable", "Stop the analysis before resetting."))
            }
            DashboardEvent::CaptureFailed { .. } => {
                Some(("Camera Inactive", "The capture device could not be opened."))
            }
            DashboardEvent::Tick(_)
            | DashboardEvent::CaptureStarted { .. }
            | DashboardEvent::CaptureStopped => None,
        }
    }
}

impl std::fmt::Display for DashboardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardEvent::AnalysisStarted => write!(f, "ANALYSIS_STARTED"),
            DashboardEvent::AnalysisStopped { ticks } => {
                write!(f, "ANALYSIS_STOPPED ({} ticks)", ticks)
            }
            DashboardEvent::ResetComplete => write!(f, "RESET_COMPLETE"),
            DashboardEvent::ResetRejected => write!(f, "RESET_REJECTED"),
            DashboardEvent::Tick(snapshot) => {
                write!(f, "TICK ({:.1}%)", snapshot.confidence)
            }
            DashboardEvent::CaptureStarted { stream_id } => {
                write!(f, "CAPTURE_STARTED (stream {})", stream_id)
            }
            DashboardEvent::CaptureStopped => write!(f, "CAPTURE_STOPPED"),
            DashboardEvent::CaptureFailed { reason } => {
                write!(f, "CAPTURE_FAILED ({})", reason)
            }
        }
    }
}
