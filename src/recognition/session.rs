use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use super::{CancelToken, Recognizer, TempImage};
use crate::config::RetryPolicy;
use crate::error::RecognitionError;
use crate::raster::RasterImage;

pub type RequestId = u64;

/// Outcome of one recognition request, posted from the worker to the UI thread
#[derive(Debug)]
pub struct RecognitionEvent {
    pub id: RequestId,
    pub outcome: Result<String, RecognitionError>,
}

struct InFlight {
    id: RequestId,
    token: CancelToken,
}

/// Runs recognitions off the UI thread, one at a time.
///
/// Workers never touch UI state: they send a [`RecognitionEvent`] down a
/// channel which the UI drains with [`RecognitionSession::poll`].
pub struct RecognitionSession {
    recognizer: Arc<dyn Recognizer>,
    retry: RetryPolicy,
    temp_dir: PathBuf,
    repaint: Option<egui::Context>,
    next_id: RequestId,
    in_flight: Option<InFlight>,
    sender: Sender<RecognitionEvent>,
    receiver: Receiver<RecognitionEvent>,
}

impl RecognitionSession {
    pub fn new(recognizer: Arc<dyn Recognizer>, retry: RetryPolicy, temp_dir: PathBuf) -> Self {
        let (sender, receiver) = channel();
        Self {
            recognizer,
            retry,
            temp_dir,
            repaint: None,
            next_id: 1,
            in_flight: None,
            sender,
            receiver,
        }
    }

    /// Wake the UI when a result arrives instead of waiting for the next input event
    pub fn set_repaint(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn repaint_context(&self) -> Option<egui::Context> {
        self.repaint.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Snapshots `raster` and recognizes it on a background thread.
    ///
    /// Fails with [`RecognitionError::Busy`] while another request is in flight.
    pub fn recognize(&mut self, raster: &RasterImage) -> Result<RequestId, RecognitionError> {
        if self.in_flight.is_some() {
            return Err(RecognitionError::Busy);
        }

        let id = self.next_id;
        let token = CancelToken::new();
        let job = Job {
            id,
            snapshot: raster.clone(),
            recognizer: Arc::clone(&self.recognizer),
            retry: self.retry,
            temp_dir: self.temp_dir.clone(),
            token: token.clone(),
            sender: self.sender.clone(),
            repaint: self.repaint.clone(),
        };

        std::thread::Builder::new()
            .name(format!("recognition-{}", id))
            .spawn(move || job.run())?;

        self.next_id += 1;
        self.in_flight = Some(InFlight { id, token });
        log::info!("Recognition {} started", id);
        Ok(id)
    }

    /// Cancels the in-flight request, if any. Its outcome will be discarded.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.token.cancel();
                log::info!("Recognition {} cancelled", in_flight.id);
                true
            }
            None => false,
        }
    }

    /// Returns the outcome of the in-flight request once it has arrived.
    pub fn poll(&mut self) -> Option<RecognitionEvent> {
        while let Ok(event) = self.receiver.try_recv() {
            match &self.in_flight {
                Some(in_flight) if in_flight.id == event.id => {
                    self.in_flight = None;
                    return Some(event);
                }
                _ => log::debug!("Dropping stale outcome of recognition {}", event.id),
            }
        }
        None
    }
}

struct Job {
    id: RequestId,
    snapshot: RasterImage,
    recognizer: Arc<dyn Recognizer>,
    retry: RetryPolicy,
    temp_dir: PathBuf,
    token: CancelToken,
    sender: Sender<RecognitionEvent>,
    repaint: Option<egui::Context>,
}

impl Job {
    fn run(self) {
        let mut outcome = self.recognize_with_retry();
        if self.token.is_cancelled() {
            outcome = Err(RecognitionError::Cancelled);
        }
        match &outcome {
            Ok(text) => log::info!("Recognition {} finished: {}", self.id, text),
            Err(err) => log::warn!("Recognition {} failed: {}", self.id, err),
        }

        // The session may already be gone; nobody is left to tell
        let _ = self.sender.send(RecognitionEvent {
            id: self.id,
            outcome,
        });
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }

    fn recognize_with_retry(&self) -> Result<String, RecognitionError> {
        // Dropped on every return path, which deletes the file
        let temp = TempImage::write(&self.temp_dir, &self.snapshot)?;

        let mut attempt = 1;
        loop {
            if self.token.is_cancelled() {
                return Err(RecognitionError::Cancelled);
            }
            match self.recognizer.recognize(temp.path()) {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    log::warn!(
                        "Recognition {} attempt {} failed ({}), retrying in {:?}",
                        self.id,
                        attempt,
                        err,
                        delay
                    );
                    if self.token.wait(delay) {
                        return Err(RecognitionError::Cancelled);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
