use crate::error::RecognitionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecognitionStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
    Cancelled,
}

/// Text of the last successful recognition plus what is happening now.
///
/// Only a successful outcome replaces the text, so a failed retry never
/// wipes a result the user may still want to save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
    text: String,
    status: RecognitionStatus,
}

impl RecognitionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> &RecognitionStatus {
        &self.status
    }

    pub fn mark_pending(&mut self) {
        self.status = RecognitionStatus::Pending;
    }

    pub fn mark_cancelled(&mut self) {
        self.status = RecognitionStatus::Cancelled;
    }

    pub fn apply(&mut self, outcome: Result<String, RecognitionError>) {
        match outcome {
            Ok(text) => {
                self.text = text;
                self.status = RecognitionStatus::Idle;
            }
            Err(RecognitionError::Cancelled) => self.status = RecognitionStatus::Cancelled,
            Err(err) => self.status = RecognitionStatus::Failed(err.to_string()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Line shown under the canvas
    pub fn display_line(&self) -> String {
        match &self.status {
            RecognitionStatus::Idle => format!("Result: {}", self.text),
            RecognitionStatus::Pending => format!("Result: {} (recognizing...)", self.text),
            RecognitionStatus::Cancelled => format!("Result: {} (cancelled)", self.text),
            RecognitionStatus::Failed(msg) => format!("Recognition failed: {}", msg),
        }
    }
}
