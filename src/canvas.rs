use egui::{Pos2, Shape, pos2};

use crate::error::CanvasError;
use crate::mode::Mode;
use crate::raster::RasterImage;
use crate::stroke::StrokeSegment;

/// Freehand drawing surface.
///
/// Keeps the shapes shown on screen and the raster sent for recognition in
/// lock step: every segment goes to both or to neither.
pub struct StrokeCanvas {
    surface: Vec<Shape>,
    raster: RasterImage,
    mode: Mode,
    // Last pointer position of the stroke in progress
    last_point: Option<Pos2>,
}

impl StrokeCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: Vec::new(),
            raster: RasterImage::new(width, height),
            mode: Mode::Draw,
            last_point: None,
        }
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.last_point = Some(pos2(x, y));
    }

    /// Draws from the stored point to `(x, y)` with the active mode
    pub fn extend_stroke(&mut self, x: f32, y: f32) -> Result<StrokeSegment, CanvasError> {
        let from = self.last_point.ok_or(CanvasError::NoActiveStroke)?;
        let to = pos2(x, y);
        let segment = StrokeSegment::new(from, to, self.mode.color(), self.mode.width());

        self.surface.extend(segment.to_shapes());
        self.raster.draw_segment(&segment);
        self.last_point = Some(to);

        Ok(segment)
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    pub fn is_stroke_active(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.raster.clear();
        self.mode = Mode::Draw;
        self.last_point = None;
        log::debug!("Canvas cleared");
    }

    /// Flips Draw/Erase and returns the label of the new mode
    pub fn toggle_eraser(&mut self) -> &'static str {
        self.mode = self.mode.toggled();
        log::debug!("Mode switched to {:?}", self.mode);
        self.mode.label()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn surface(&self) -> &[Shape] {
        &self.surface
    }

    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_without_begin_fails() {
        let mut canvas = StrokeCanvas::new(50, 50);
        assert_eq!(canvas.extend_stroke(5.0, 5.0), Err(CanvasError::NoActiveStroke));
        assert!(canvas.surface().is_empty());
        assert!(canvas.raster().is_blank());
    }

    #[test]
    fn test_extend_after_end_fails() {
        let mut canvas = StrokeCanvas::new(50, 50);
        canvas.begin_stroke(1.0, 1.0);
        canvas.extend_stroke(10.0, 10.0).unwrap();
        canvas.end_stroke();
        assert!(!canvas.is_stroke_active());
        assert_eq!(canvas.extend_stroke(20.0, 20.0), Err(CanvasError::NoActiveStroke));
    }

    #[test]
    fn test_segment_chains_from_last_point() {
        let mut canvas = StrokeCanvas::new(50, 50);
        canvas.begin_stroke(1.0, 2.0);
        let first = canvas.extend_stroke(3.0, 4.0).unwrap();
        let second = canvas.extend_stroke(5.0, 6.0).unwrap();
        assert_eq!(first.from(), pos2(1.0, 2.0));
        assert_eq!(second.from(), first.to());
    }

    #[test]
    fn test_toggle_eraser_label() {
        let mut canvas = StrokeCanvas::new(10, 10);
        assert_eq!(canvas.toggle_eraser(), "Eraser");
        assert_eq!(canvas.mode(), Mode::Erase);
        assert_eq!(canvas.toggle_eraser(), "Pencil");
        assert_eq!(canvas.mode(), Mode::Draw);
    }
}
