//! Live re-processing loop
//!
//! A worker thread re-runs the quadrant segmentation of one image a fixed
//! number of times, sleeping before each frame, and publishes every frame
//! on a channel. A [`CancelToken`] stops it before the next frame.

use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;
use crate::report::QuadrantReport;
use crate::{PipelineError, PipelineResult};
use quadbit_core::Pix;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One published frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveFrame {
    pub frame: u32,
    pub regions: Vec<QuadrantReport>,
}

/// Handle to a running live loop
#[derive(Debug)]
pub struct LiveRunner {
    receiver: Receiver<LiveFrame>,
    cancel: CancelToken,
    handle: JoinHandle<PipelineResult<u32>>,
}

impl LiveRunner {
    /// Start the loop on a worker thread.
    ///
    /// The configuration is validated before the thread starts.
    pub fn spawn(
        image: Pix,
        config: PipelineConfig,
        frames: u32,
        delay: Duration,
    ) -> PipelineResult<Self> {
        let pipeline = Pipeline::new(config)?;
        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let handle = thread::spawn(move || -> PipelineResult<u32> {
            let mut published = 0;
            for frame in 0..frames {
                if token.is_cancelled() {
                    break;
                }
                thread::sleep(delay);
                if token.is_cancelled() {
                    break;
                }
                let segmentation = pipeline.segment(&image)?;
                let live = LiveFrame {
                    frame,
                    regions: QuadrantReport::from_regions(&segmentation.quadrants),
                };
                if sender.send(live).is_err() {
                    debug!(frame, "live receiver dropped");
                    break;
                }
                debug!(frame, regions = segmentation.region_count(), "live frame");
                published += 1;
            }
            info!(published, requested = frames, "live loop finished");
            Ok(published)
        });

        Ok(Self {
            receiver,
            cancel,
            handle,
        })
    }

    /// Block until the next frame; `None` once the loop has ended.
    pub fn recv(&self) -> Option<LiveFrame> {
        self.receiver.recv().ok()
    }

    /// Wait at most `timeout` for the next frame.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LiveFrame> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Iterate over frames until the loop ends.
    pub fn iter(&self) -> impl Iterator<Item = LiveFrame> + '_ {
        self.receiver.iter()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the worker and return the number of frames published.
    pub fn join(self) -> PipelineResult<u32> {
        drop(self.receiver);
        self.handle
            .join()
            .map_err(|_| PipelineError::Worker("live worker panicked".to_string()))?
    }
}
