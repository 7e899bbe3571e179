//! Simulated signal generator
//!
//! Random-walks the confidence value and re-draws indicator labels. All
//! randomness comes from the caller's rng so sequences are reproducible
//! under a fixed seed.

use rand::Rng;
use tracing::trace;

use super::indicator::{IndicatorKind, IndicatorSet};

/// Lowest confidence reachable by the walk
pub const CONFIDENCE_FLOOR: f64 = 15.0;
/// Highest confidence reachable by the walk
pub const CONFIDENCE_CEILING: f64 = 85.0;
/// Full width of the per-tick step, centered on zero
pub const STEP_WIDTH: f64 = 15.0;

/// Gate `r` must exceed for each kind to be re-drawn, and the threshold its
/// coin must exceed to land on the first ("high") label.
const GATES: [(IndicatorKind, f64, f64); 4] = [
    (IndicatorKind::EyeDirection, 0.7, 0.5),
    (IndicatorKind::FacialTension, 0.6, 0.6),
    (IndicatorKind::VoicePattern, 0.5, 0.5),
    (IndicatorKind::BodyLanguage, 0.4, 0.6),
];

/// Stateless step function over confidence and indicators
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalGenerator;

impl SignalGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Advance one tick: walk `confidence` and maybe re-draw indicators.
    pub fn step<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        confidence: f64,
        indicators: &mut IndicatorSet,
    ) -> f64 {
        let next = self.walk(rng, confidence);

        let r: f64 = rng.gen();
        for (kind, gate, coin) in GATES {
            if r > gate {
                let (high, low) = kind.drawn_labels();
                let label = if rng.gen::<f64>() > coin { high } else { low };
                indicators.get_mut(kind).label = label;
            }
        }

        trace!(from = confidence, to = next, r, "signal step");
        next
    }

    /// One clamped random-walk step
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R, confidence: f64) -> f64 {
        let change = (rng.gen::<f64>() - 0.5) * STEP_WIDTH;
        (confidence + change).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
    }
}
