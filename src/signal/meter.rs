//! Truth meter read-outs derived from the confidence value

use serde::Serialize;

/// Confidence shown whenever analysis is inactive
pub const RESTING_CONFIDENCE: f64 = 50.0;

/// At or above this the meter reads truthful
pub const TRUTH_THRESHOLD: f64 = 70.0;

/// At or below this the meter reads deceptive
pub const LIE_THRESHOLD: f64 = 30.0;

/// Which band the displayed value falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterBand {
    Truth,
    Lie,
    Neutral,
}

impl std::fmt::Display for MeterBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeterBand::Truth => write!(f, "TRUTH"),
            MeterBand::Lie => write!(f, "LIE"),
            MeterBand::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// What the meter displays for a given confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeterReading {
    /// Value on the gauge (confidence while active, resting value otherwise)
    pub display: f64,
    pub band: MeterBand,
    /// Rounded `100 - display`
    pub deception: i64,
    /// Rounded distance from the resting value
    pub deviation: i64,
    /// Rounded `display`
    pub honesty: i64,
}

impl MeterReading {
    pub fn new(confidence: f64, active: bool) -> Self {
        let display = if active { confidence } else { RESTING_CONFIDENCE };

        let band = if display >= TRUTH_THRESHOLD {
            MeterBand::Truth
        } else if display <= LIE_THRESHOLD {
            MeterBand::Lie
        } else {
            MeterBand::Neutral
        };

        Self {
            display,
            band,
            deception: round_half_up(100.0 - display),
            deviation: round_half_up(display - RESTING_CONFIDENCE).abs(),
            honesty: round_half_up(display),
        }
    }
}

// Halves round toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_meter_rests_at_fifty() {
        let reading = MeterReading::new(82.0, false);
        assert_eq!(reading.display, 50.0);
        assert_eq!(reading.band, MeterBand::Neutral);
        assert_eq!(reading.deception, 50);
        assert_eq!(reading.deviation, 0);
        assert_eq!(reading.honesty, 50);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(MeterReading::new(70.0, true).band, MeterBand::Truth);
        assert_eq!(MeterReading::new(69.9, true).band, MeterBand::Neutral);
        assert_eq!(MeterReading::new(30.0, true).band, MeterBand::Lie);
        assert_eq!(MeterReading::new(30.1, true).band, MeterBand::Neutral);
    }

    #[test]
    fn test_read_outs() {
        let reading = MeterReading::new(72.4, true);
        assert_eq!(reading.honesty, 72);
        assert_eq!(reading.deception, 28);
        assert_eq!(reading.deviation, 22);

        let low = MeterReading::new(22.6, true);
        assert_eq!(low.honesty, 23);
        assert_eq!(low.deception, 77);
        assert_eq!(low.deviation, 27);
    }

    #[test]
    fn test_negative_halves_round_up() {
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(2.5), 3);
    }
}
