use std::path::Path;

use crate::error::RecognitionError;

mod cancel;
mod gradio;
mod result;
mod session;
mod temp_image;

pub use cancel::CancelToken;
pub use gradio::GradioRecognizer;
pub use result::{RecognitionResult, RecognitionStatus};
pub use session::{RecognitionEvent, RecognitionSession, RequestId};
pub use temp_image::TempImage;

/// Turns an image file into text. Implementations may block.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError>;
}
