use std::sync::Arc;

use crate::artifacts::{ArtifactStore, SavedArtifacts};
use crate::canvas::StrokeCanvas;
use crate::config::{AppConfig, CONFIG_KEY, RecognitionConfig};
use crate::error::RecognitionError;
use crate::input::{InputHandler, PointerSample, route_event};
use crate::panels;
use crate::recognition::{GradioRecognizer, RecognitionResult, RecognitionSession, Recognizer};
use crate::renderer::Renderer;

/// Modal message shown over the main window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Saved(SavedArtifacts),
    SaveFailed(String),
}

pub struct FormulaApp {
    config: AppConfig,
    canvas: StrokeCanvas,
    input: InputHandler,
    renderer: Renderer,
    session: RecognitionSession,
    store: ArtifactStore,
    result: RecognitionResult,
    dialog: Option<Dialog>,
    // Edited copy of the recognition settings while the settings window is open
    settings_draft: Option<RecognitionConfig>,
}

impl FormulaApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, RecognitionError> {
        let config: AppConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, CONFIG_KEY))
            .unwrap_or_default();
        log::info!("Using recognition endpoint {}", config.recognition.endpoint);

        let recognizer = Arc::new(GradioRecognizer::new(&config.recognition)?);
        let mut app = Self::with_recognizer(config, recognizer);
        app.session.set_repaint(cc.egui_ctx.clone());
        Ok(app)
    }

    /// Builds the app around any recognizer, without a window
    pub fn with_recognizer(config: AppConfig, recognizer: Arc<dyn Recognizer>) -> Self {
        let (width, height) = config.canvas_size();
        let store = ArtifactStore::from_config(&config);
        if let Err(err) = store.ensure_dirs() {
            log::error!("{}", err);
        }
        Self {
            canvas: StrokeCanvas::new(width, height),
            input: InputHandler::new(),
            renderer: Renderer::new(),
            session: build_session(&config, recognizer),
            store,
            result: RecognitionResult::new(),
            dialog: None,
            settings_draft: None,
            config,
        }
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn result(&self) -> &RecognitionResult {
        &self.result
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn is_recognizing(&self) -> bool {
        self.session.is_busy()
    }

    /// Feeds one frame of canvas pointer state into the stroke canvas
    pub fn handle_pointer(&mut self, sample: PointerSample) {
        for event in self.input.process(sample) {
            if let Err(err) = route_event(&event, &mut self.canvas) {
                log::warn!("Ignoring {:?}: {}", event, err);
            }
        }
    }

    pub fn recognize(&mut self) {
        match self.session.recognize(self.canvas.raster()) {
            Ok(_) => self.result.mark_pending(),
            Err(RecognitionError::Busy) => log::warn!("Recognition already in progress"),
            Err(err) => {
                log::error!("Could not start recognition: {}", err);
                self.result.apply(Err(err));
            }
        }
    }

    pub fn cancel_recognition(&mut self) {
        if self.session.cancel() {
            self.result.mark_cancelled();
        }
    }

    /// Applies a finished recognition, if one has arrived. Called every frame.
    pub fn poll_recognition(&mut self) {
        if let Some(event) = self.session.poll() {
            self.result.apply(event.outcome);
        }
    }

    /// Wipes the drawing and the result; a pending recognition would describe the old drawing
    pub fn clear(&mut self) {
        self.session.cancel();
        self.canvas.clear();
        self.result.reset();
    }

    pub fn toggle_eraser(&mut self) -> &'static str {
        self.canvas.toggle_eraser()
    }

    pub fn save_all(&mut self) {
        self.dialog = Some(match self.store.save_all(self.canvas.raster(), self.result.text()) {
            Ok(saved) => Dialog::Saved(saved),
            Err(err) => {
                log::error!("Save failed: {}", err);
                Dialog::SaveFailed(err.to_string())
            }
        });
    }

    pub fn open_settings(&mut self) {
        self.settings_draft = Some(self.config.recognition.clone());
    }

    pub fn close_settings(&mut self) {
        self.settings_draft = None;
    }

    pub fn settings_draft_mut(&mut self) -> Option<&mut RecognitionConfig> {
        self.settings_draft.as_mut()
    }

    /// Rebuilds the recognizer from the edited settings
    pub fn apply_settings(&mut self) -> Result<(), RecognitionError> {
        let Some(draft) = self.settings_draft.take() else {
            return Ok(());
        };
        if self.session.is_busy() {
            self.settings_draft = Some(draft);
            return Err(RecognitionError::Busy);
        }
        let recognizer = match GradioRecognizer::new(&draft) {
            Ok(recognizer) => Arc::new(recognizer),
            Err(err) => {
                self.settings_draft = Some(draft);
                return Err(err);
            }
        };
        self.config.recognition = draft;
        self.replace_recognizer(recognizer);
        log::info!("Recognition settings updated: {:?}", self.config.recognition);
        Ok(())
    }

    /// Swaps the recognizer behind the session. Only valid while idle.
    pub fn replace_recognizer(&mut self, recognizer: Arc<dyn Recognizer>) {
        let repaint = self.session.repaint_context();
        self.session = build_session(&self.config, recognizer);
        if let Some(ctx) = repaint {
            self.session.set_repaint(ctx);
        }
    }
}

fn build_session(config: &AppConfig, recognizer: Arc<dyn Recognizer>) -> RecognitionSession {
    RecognitionSession::new(
        recognizer,
        config.recognition.retry_policy(),
        config.temp_dir.clone(),
    )
}

impl eframe::App for FormulaApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_recognition();
        panels::central_panel(self, ctx);
        panels::dialogs(self, ctx);
    }
}
