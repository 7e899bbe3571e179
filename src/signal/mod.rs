//! Simulated analysis signals
//!
//! Provides the random-walk confidence generator, the four categorical
//! indicators with their classifier, and the derived truth meter read-outs.
//! Nothing here measures anything real.

mod generator;
mod indicator;
mod meter;

pub use generator::SignalGenerator;
#[cfg(test)]
pub use generator::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
pub use indicator::{Classification, IndicatorKind, IndicatorSet};
pub use meter::{MeterReading, RESTING_CONFIDENCE};
