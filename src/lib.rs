#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod artifacts;
pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod mode;
pub mod panels;
pub mod raster;
pub mod recognition;
pub mod renderer;
pub mod stroke;

pub use app::FormulaApp;
pub use artifacts::{ArtifactStore, SavedArtifacts, next_available_name};
pub use canvas::StrokeCanvas;
pub use config::AppConfig;
pub use error::{CanvasError, PersistenceError, RecognitionError};
pub use input::{InputEvent, InputHandler};
pub use mode::Mode;
pub use raster::RasterImage;
pub use recognition::{RecognitionResult, RecognitionSession, Recognizer};
pub use renderer::Renderer;
pub use stroke::StrokeSegment;
