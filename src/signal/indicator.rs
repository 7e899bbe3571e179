//! Behavioral indicators and their three-way classification
//!
//! Each indicator kind has a fixed label set, a baseline label it starts
//! from (and returns to on reset), and the subset of labels read as
//! affirmative.

use serde::{Deserialize, Serialize};

/// Labels treated as the neutral baseline regardless of category
pub const BASELINE_LABELS: [&str; 3] = ["Neutral", "Center", "Normal"];

/// Cosmetic bucket an indicator label falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Label reads as truthful
    Affirmative,
    /// Label reads as deceptive
    Contrary,
    /// Baseline label, no reading either way
    Neutral,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Affirmative => write!(f, "truth"),
            Classification::Contrary => write!(f, "lie"),
            Classification::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classify a label against a category's affirmative set.
///
/// Membership in `affirmative` wins over the baseline check, so "Center"
/// for eye direction and "Normal" for voice pattern are affirmative.
pub fn classify(label: &str, affirmative: &[&str]) -> Classification {
    if affirmative.contains(&label) {
        Classification::Affirmative
    } else if BASELINE_LABELS.contains(&label) {
        Classification::Neutral
    } else {
        Classification::Contrary
    }
}

/// The four indicator categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    EyeDirection,
    FacialTension,
    VoicePattern,
    BodyLanguage,
}

impl IndicatorKind {
    /// All kinds in display order
    pub const ALL: [IndicatorKind; 4] = [
        IndicatorKind::EyeDirection,
        IndicatorKind::FacialTension,
        IndicatorKind::VoicePattern,
        IndicatorKind::BodyLanguage,
    ];

    /// Label shown before the first tick and after a reset
    pub fn baseline(self) -> &'static str {
        match self {
            IndicatorKind::EyeDirection => "Center",
            IndicatorKind::FacialTension => "Relaxed",
            IndicatorKind::VoicePattern => "Normal",
            IndicatorKind::BodyLanguage => "Neutral",
        }
    }

    /// Labels a tick may draw, as (when the coin lands high, otherwise)
    pub fn drawn_labels(self) -> (&'static str, &'static str) {
        match self {
            IndicatorKind::EyeDirection => ("Upward", "Straight"),
            IndicatorKind::FacialTension => ("Tense", "Relaxed"),
            IndicatorKind::VoicePattern => ("Fast", "Normal"),
            IndicatorKind::BodyLanguage => ("Restless", "Calm"),
        }
    }

    /// Labels read as affirmative for this kind
    pub fn affirmative(self) -> &'static [&'static str] {
        match self {
            IndicatorKind::EyeDirection => &["Straight", "Center"],
            IndicatorKind::FacialTension => &["Relaxed"],
            IndicatorKind::VoicePattern => &["Normal"],
            IndicatorKind::BodyLanguage => &["Calm"],
        }
    }

    /// Whether `label` belongs to this kind's fixed label set
    #[cfg(test)]
    pub fn accepts(self, label: &str) -> bool {
        let (high, low) = self.drawn_labels();
        label == self.baseline() || label == high || label == low
    }

    /// Human-readable category name
    pub fn title(self) -> &'static str {
        match self {
            IndicatorKind::EyeDirection => "Eye Direction",
            IndicatorKind::FacialTension => "Facial Tension",
            IndicatorKind::VoicePattern => "Voice Pattern",
            IndicatorKind::BodyLanguage => "Body Language",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// An indicator's current label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub label: &'static str,
}

impl Indicator {
    /// Indicator sitting at its baseline label
    pub fn baseline(kind: IndicatorKind) -> Self {
        Self {
            kind,
            label: kind.baseline(),
        }
    }

    pub fn classification(&self) -> Classification {
        classify(self.label, self.kind.affirmative())
    }
}

/// The full set of four indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorSet {
    pub eye_direction: Indicator,
    pub facial_tension: Indicator,
    pub voice_pattern: Indicator,
    pub body_language: Indicator,
}

impl IndicatorSet {
    pub fn get(&self, kind: IndicatorKind) -> &Indicator {
        match kind {
            IndicatorKind::EyeDirection => &self.eye_direction,
            IndicatorKind::FacialTension => &self.facial_tension,
            IndicatorKind::VoicePattern => &self.voice_pattern,
            IndicatorKind::BodyLanguage => &self.body_language,
        }
    }

    pub fn get_mut(&mut self, kind: IndicatorKind) -> &mut Indicator {
        match kind {
            IndicatorKind::EyeDirection => &mut self.eye_direction,
            IndicatorKind::FacialTension => &mut self.facial_tension,
            IndicatorKind::VoicePattern => &mut self.voice_pattern,
            IndicatorKind::BodyLanguage => &mut self.body_language,
        }
    }

    /// Iterate indicators in display order
    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        IndicatorKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self {
            eye_direction: Indicator::baseline(IndicatorKind::EyeDirection),
            facial_tension: Indicator::baseline(IndicatorKind::FacialTension),
            voice_pattern: Indicator::baseline(IndicatorKind::VoicePattern),
            body_language: Indicator::baseline(IndicatorKind::BodyLanguage),
        }
    }
}
