//! Acquire-on-activate, release-on-deactivate handling of the capture stream

use serde::Serialize;
use tracing::{debug, error, info};

use super::source::{CaptureError, MediaConstraints, MediaSource, MediaStream, MediaTrack};

/// What the video panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureDisplay {
    /// Bound to a live stream
    Live,
    /// No stream held ("Camera Inactive")
    #[default]
    Inactive,
}

type StreamObserver = Box<dyn FnMut(&MediaStream) + Send>;

/// Owns at most one acquired stream at a time
pub struct CaptureLifecycle<S: MediaSource> {
    source: S,
    constraints: MediaConstraints,
    stream: Option<MediaStream>,
    observer: Option<StreamObserver>,
}

impl<S: MediaSource> CaptureLifecycle<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            constraints: MediaConstraints::default(),
            stream: None,
            observer: None,
        }
    }

    /// Replace the constraints sent with every request
    pub fn with_constraints(mut self, constraints: MediaConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Register a callback invoked with every newly acquired stream
    pub fn with_observer(mut self, observer: impl FnMut(&MediaStream) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Live while a held stream still has a live track
    pub fn display(&self) -> CaptureDisplay {
        match &self.stream {
            Some(stream) if stream.tracks().iter().any(MediaTrack::is_live) => CaptureDisplay::Live,
            _ => CaptureDisplay::Inactive,
        }
    }

    pub fn stream(&self) -> Option<&MediaStream> {
        self.stream.as_ref()
    }

    /// Request a stream and bind it for display.
    ///
    /// A failed request is logged and leaves the display inactive; the
    /// error is returned so the caller can report it, but nothing retries.
    /// Activating while a stream is held releases the old one first.
    pub async fn activate(&mut self) -> Result<(), CaptureError> {
        self.deactivate();

        match self.source.acquire(&self.constraints).await {
            Ok(stream) => {
                info!(
                    stream_id = stream.id(),
                    tracks = stream.tracks().len(),
                    "capture stream acquired"
                );
                for track in stream.tracks() {
                    debug!(kind = ?track.kind(), label = track.label(), "track live");
                }
                if let Some(observer) = self.observer.as_mut() {
                    observer(&stream);
                }
                self.stream = Some(stream);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error accessing camera");
                Err(e)
            }
        }
    }

    /// Stop every track of the held stream and forget it. No-op when idle.
    pub fn deactivate(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_all();
            info!(stream_id = stream.id(), "capture stream released");
        }
    }
}

impl<S: MediaSource> Drop for CaptureLifecycle<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::capture::source::{DeviceAvailability, SimulatedSource};

    #[tokio::test]
    async fn test_activate_binds_stream() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        assert_eq!(capture.display(), CaptureDisplay::Inactive);

        capture.activate().await.unwrap();
        assert_eq!(capture.display(), CaptureDisplay::Live);
        assert!(capture.stream().is_some());
    }

    #[tokio::test]
    async fn test_deactivate_stops_tracks_and_is_idempotent() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        capture.activate().await.unwrap();
        let liveness: Vec<_> = capture
            .stream()
            .unwrap()
            .tracks()
            .iter()
            .map(|t| t.liveness())
            .collect();

        capture.deactivate();
        capture.deactivate();

        assert!(capture.stream().is_none());
        assert_eq!(capture.display(), CaptureDisplay::Inactive);
        assert!(liveness.iter().all(|l| !l.is_live()));
    }

    #[test]
    fn test_deactivate_without_stream() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        capture.deactivate();
        assert!(capture.stream().is_none());
    }

    #[tokio::test]
    async fn test_failed_activation_stays_inactive() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::new(DeviceAvailability::Missing));
        let result = capture.activate().await;
        assert!(matches!(result, Err(CaptureError::Unavailable)));
        assert_eq!(capture.display(), CaptureDisplay::Inactive);
    }

    #[tokio::test]
    async fn test_display_follows_track_liveness() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        capture.activate().await.unwrap();

        // Tracks ended underneath the lifecycle leave nothing to show
        capture.stream().unwrap().stop_all();
        assert_eq!(capture.display(), CaptureDisplay::Inactive);
    }

    #[tokio::test]
    async fn test_constraints_reach_the_source() {
        let constraints = MediaConstraints {
            audio: false,
            ..MediaConstraints::default()
        };
        let mut capture =
            CaptureLifecycle::new(SimulatedSource::default()).with_constraints(constraints);
        capture.activate().await.unwrap();
        assert_eq!(capture.stream().unwrap().tracks().len(), 1);
    }

    #[tokio::test]
    async fn test_observer_sees_each_stream() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut capture = CaptureLifecycle::new(SimulatedSource::default())
            .with_observer(move |stream| sink.lock().unwrap().push(stream.id()));

        capture.activate().await.unwrap();
        capture.activate().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_reactivation_releases_previous_stream() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        capture.activate().await.unwrap();
        let first = capture.stream().unwrap().tracks()[0].liveness();

        capture.activate().await.unwrap();
        assert!(!first.is_live());
        assert!(capture.stream().unwrap().tracks()[0].is_live());
    }

    #[tokio::test]
    async fn test_drop_releases_stream() {
        let mut capture = CaptureLifecycle::new(SimulatedSource::default());
        capture.activate().await.unwrap();
        let video = capture.stream().unwrap().tracks()[0].liveness();

        drop(capture);
        assert!(!video.is_live());
    }
}
