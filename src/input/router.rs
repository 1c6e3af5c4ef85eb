use crate::canvas::StrokeCanvas;
use crate::error::CanvasError;
use crate::stroke::StrokeSegment;

use super::InputEvent;

/// Applies one canvas input event, returning the segment drawn if any
pub fn route_event(
    event: &InputEvent,
    canvas: &mut StrokeCanvas,
) -> Result<Option<StrokeSegment>, CanvasError> {
    match *event {
        InputEvent::PointerDown { position } => {
            canvas.begin_stroke(position.x, position.y);
            Ok(None)
        }
        InputEvent::PointerMove { position } => canvas.extend_stroke(position.x, position.y).map(Some),
        InputEvent::PointerUp => {
            canvas.end_stroke();
            Ok(None)
        }
    }
}
