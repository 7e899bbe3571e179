//! Capture module for the camera/microphone stream
//!
//! A stream is acquired when analysis starts and every track is stopped
//! when it ends or the owner is dropped. The shipped source is simulated;
//! real devices plug in through [`MediaSource`].

mod lifecycle;
mod source;

pub use lifecycle::{CaptureDisplay, CaptureLifecycle};
pub use source::{DeviceAvailability, FacingMode, MediaConstraints, MediaSource, SimulatedSource};
