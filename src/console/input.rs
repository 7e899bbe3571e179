//! Line reader for the console
//!
//! Reads stdin on a dedicated thread so a pending read never holds up
//! runtime shutdown. Lines are handed to the async side over a channel.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors from starting the reader
#[derive(Debug, Error)]
pub enum InputError {
    #[error("console reader is already running")]
    AlreadyRunning,

    #[error("failed to spawn reader thread: {0}")]
    ThreadSpawn(String),
}

/// Reads lines from any blocking source and forwards them
pub struct LineReader {
    line_tx: mpsc::Sender<String>,
    running: Arc<AtomicBool>,
}

impl LineReader {
    pub fn new(line_tx: mpsc::Sender<String>) -> Self {
        Self {
            line_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the reader thread over stdin
    pub fn start(&self) -> Result<(), InputError> {
        self.start_with(|| Box::new(std::io::stdin().lock()))
    }

    /// Spawn the reader thread over the source built by `open`.
    ///
    /// The thread ends at EOF, on a read error, when the receiving side
    /// is dropped, or after `stop()` once the next line arrives.
    pub fn start_with<F>(&self, open: F) -> Result<(), InputError>
    where
        F: FnOnce() -> Box<dyn BufRead> + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(InputError::AlreadyRunning);
        }

        let line_tx = self.line_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("console-input".to_string())
            .spawn(move || {
                debug!("console reader thread started");

                for line in open().lines() {
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }
                    match line {
                        Ok(line) => {
                            if line_tx.blocking_send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(?e, "failed to read console input");
                            break;
                        }
                    }
                }

                running.store(false, Ordering::SeqCst);
                info!("console input closed");
            })
            .map_err(|e| InputError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    /// Ask the reader thread to exit
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[tokio::test]
    async fn test_lines_are_forwarded_until_eof() {
        let (tx, mut rx) = mpsc::channel(8);
        let reader = LineReader::new(tx);
        reader
            .start_with(|| Box::new(Cursor::new("start\nstatus\n")))
            .unwrap();
        drop(reader);

        assert_eq!(rx.recv().await.as_deref(), Some("start"));
        assert_eq!(rx.recv().await.as_deref(), Some("status"));
        assert_eq!(rx.recv().await, None);
    }
}
