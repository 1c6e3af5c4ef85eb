use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the stroke canvas
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CanvasError {
    /// A drag event arrived without a preceding pointer-down
    #[error("no active stroke: extend_stroke called before begin_stroke")]
    NoActiveStroke,
}

/// Errors that can occur while turning the sketch into text
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("a recognition request is already in progress")]
    Busy,
    #[error("recognition was cancelled")]
    Cancelled,
    #[error("recognition service timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("recognition service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("recognition service reported an error: {0}")]
    Service(String),
    #[error("malformed response from recognition service: {0}")]
    MalformedResponse(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode sketch: {0}")]
    Encode(#[from] image::ImageError),
}

impl RecognitionError {
    /// Whether another attempt has a reasonable chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::Rejected { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RecognitionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Rejected {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors raised while writing artifacts to disk
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The image was already saved at `image_path` when no formula file could be created
    #[error("failed to create formula {} (image kept at {}): {source}", path.display(), image_path.display())]
    CreateText {
        path: PathBuf,
        image_path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write image {}: {source}", path.display())]
    WriteImage {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The image was already saved at `image_path` when the text write failed
    #[error("failed to write formula {} (image kept at {}): {source}", path.display(), image_path.display())]
    WriteText {
        path: PathBuf,
        image_path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(RecognitionError::Timeout.is_transient());
        assert!(RecognitionError::Network("reset".into()).is_transient());
        assert!(RecognitionError::Rejected { status: 503, body: String::new() }.is_transient());
        assert!(!RecognitionError::Rejected { status: 404, body: String::new() }.is_transient());
        assert!(!RecognitionError::MalformedResponse("{}".into()).is_transient());
        assert!(!RecognitionError::Cancelled.is_transient());
    }
}
