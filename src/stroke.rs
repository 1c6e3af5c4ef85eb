use egui::{Color32, Pos2, Shape};

/// One drawn line from the previous pointer position to the current one.
///
/// Segments are applied once to the visible surface and the raster, then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    from: Pos2,
    to: Pos2,
    color: Color32,
    width: f32,
}

impl StrokeSegment {
    pub fn new(from: Pos2, to: Pos2, color: Color32, width: f32) -> Self {
        Self {
            from,
            to,
            color,
            width,
        }
    }

    pub fn from(&self) -> Pos2 {
        self.from
    }

    pub fn to(&self) -> Pos2 {
        self.to
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Shapes for the visible canvas, in canvas-local coordinates.
    ///
    /// egui line segments have butt ends, so a disc is added at both ends to
    /// get the same round caps the raster gets.
    pub fn to_shapes(&self) -> [Shape; 3] {
        let radius = self.width / 2.0;
        [
            Shape::line_segment([self.from, self.to], egui::Stroke::new(self.width, self.color)),
            Shape::circle_filled(self.from, radius, self.color),
            Shape::circle_filled(self.to, radius, self.color),
        ]
    }
}
