// src/renderer.rs
use eframe::egui::{self, Color32, Rect, Shape, Stroke};

use crate::canvas::StrokeCanvas;
use crate::mode::BACKGROUND;

#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    border: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            background: BACKGROUND,
            border: Stroke::new(1.0, Color32::GRAY),
        }
    }

    /// Shapes for one frame of the canvas placed at `rect`
    ///
    /// Args:
    ///     canvas (StrokeCanvas): The canvas whose surface is drawn
    ///     rect (egui::Rect): Screen rectangle the canvas occupies
    pub fn canvas_shapes(&self, canvas: &StrokeCanvas, rect: Rect) -> Vec<Shape> {
        let offset = rect.min.to_vec2();
        let mut shapes = Vec::with_capacity(canvas.surface().len() + 2);
        shapes.push(Shape::rect_filled(rect, 0.0, self.background));
        shapes.extend(canvas.surface().iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
        shapes.push(Shape::rect_stroke(rect, 0.0, self.border));
        shapes
    }

    /// Renders the canvas, clipped to its rectangle
    pub fn render(&self, painter: &egui::Painter, rect: Rect, canvas: &StrokeCanvas) {
        let painter = painter.with_clip_rect(rect);
        painter.extend(self.canvas_shapes(canvas, rect));
    }
}
