use egui::{Context, PointerButton, Pos2, Response};

mod router;
pub use router::route_event;

/// Pointer events on the drawing canvas, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on the canvas
    PointerDown { position: Pos2 },
    /// Pointer dragged while the button is held
    PointerMove { position: Pos2 },
    /// Button released, ending the stroke
    PointerUp,
}

/// What egui reported about the canvas for one frame
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerSample {
    pub drag_started: bool,
    pub dragged: bool,
    pub drag_stopped: bool,
    /// Where the button went down, which egui knows before the drag threshold is passed
    pub press_origin: Option<Pos2>,
    pub position: Option<Pos2>,
}

impl PointerSample {
    /// Reads the primary-button drag state of the canvas response
    pub fn from_response(ctx: &Context, response: &Response) -> Self {
        let origin = response.rect.min;
        let to_local = |p: Pos2| (p - origin).to_pos2();
        Self {
            drag_started: response.drag_started_by(PointerButton::Primary),
            dragged: response.dragged_by(PointerButton::Primary),
            drag_stopped: response.drag_stopped_by(PointerButton::Primary),
            press_origin: ctx.input(|i| i.pointer.press_origin()).map(to_local),
            position: response.interact_pointer_pos().map(to_local),
        }
    }
}

/// Turns per-frame drag state into a begin / extend / end event sequence
#[derive(Debug, Default)]
pub struct InputHandler {
    dragging: bool,
    last_position: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if sample.drag_started {
            if let Some(start) = sample.press_origin.or(sample.position) {
                events.push(InputEvent::PointerDown { position: start });
                self.dragging = true;
                self.last_position = Some(start);
            }
        }

        if self.dragging && sample.dragged {
            if let Some(position) = sample.position {
                // egui repaints without movement too; skip duplicate points
                if self.last_position != Some(position) {
                    events.push(InputEvent::PointerMove { position });
                    self.last_position = Some(position);
                }
            }
        }

        if self.dragging && sample.drag_stopped {
            events.push(InputEvent::PointerUp);
            self.dragging = false;
            self.last_position = None;
        }

        events
    }
}
