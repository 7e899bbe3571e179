//! Media sources and the streams they hand out

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Which way the requested camera should face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

/// Constraints passed with an acquisition request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaConstraints {
    pub width: u32,
    pub height: u32,
    pub facing_mode: FacingMode,
    pub audio: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing_mode: FacingMode::User,
            audio: true,
        }
    }
}

/// Errors from acquiring a stream
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture device available")]
    Unavailable,

    #[error("permission to use {0} was denied")]
    PermissionDenied(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Video,
    Audio,
}

/// One live track of a stream
#[derive(Debug)]
pub struct MediaTrack {
    kind: TrackKind,
    label: String,
    live: Arc<AtomicBool>,
}

impl MediaTrack {
    pub fn new(kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Handle that keeps reporting liveness after the track is dropped
    #[cfg(test)]
    pub fn liveness(&self) -> TrackLiveness {
        TrackLiveness(Arc::clone(&self.live))
    }

    /// Stop the track. Stopping twice is harmless.
    pub fn stop(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            debug!(kind = ?self.kind, label = %self.label, "track stopped");
        }
    }
}

/// Observer for a track's liveness
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct TrackLiveness(Arc<AtomicBool>);

#[cfg(test)]
impl TrackLiveness {
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A combined audio/video stream
#[derive(Debug)]
pub struct MediaStream {
    id: u64,
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    pub fn new(id: u64, tracks: Vec<MediaTrack>) -> Self {
        Self { id, tracks }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Stop every track
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// Something that can hand out media streams
#[allow(async_fn_in_trait)]
pub trait MediaSource {
    async fn acquire(&mut self, constraints: &MediaConstraints) -> Result<MediaStream, CaptureError>;
}

/// What a simulated device does when asked for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceAvailability {
    #[default]
    Present,
    Missing,
    Denied,
}

/// In-process stand-in for a camera and microphone
#[derive(Debug, Default)]
pub struct SimulatedSource {
    device: DeviceAvailability,
    acquired: u64,
}

impl SimulatedSource {
    pub fn new(device: DeviceAvailability) -> Self {
        Self { device, acquired: 0 }
    }
}

impl MediaSource for SimulatedSource {
    async fn acquire(&mut self, constraints: &MediaConstraints) -> Result<MediaStream, CaptureError> {
        match self.device {
            DeviceAvailability::Present => {}
            DeviceAvailability::Missing => return Err(CaptureError::Unavailable),
            DeviceAvailability::Denied => {
                return Err(CaptureError::PermissionDenied("camera and microphone".into()))
            }
        }

        self.acquired += 1;
        let id = self.acquired;
        let mut tracks = vec![MediaTrack::new(
            TrackKind::Video,
            format!(
                "simulated camera {}x{} ({:?})",
                constraints.width, constraints.height, constraints.facing_mode
            ),
        )];
        if constraints.audio {
            tracks.push(MediaTrack::new(TrackKind::Audio, "simulated microphone"));
        }

        Ok(MediaStream::new(id, tracks))
    }
}
