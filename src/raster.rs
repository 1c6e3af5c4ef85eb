use egui::{Color32, Pos2};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::{Seek, Write};

use crate::mode::BACKGROUND;
use crate::stroke::StrokeSegment;

/// Off-screen mirror of everything drawn on the visible canvas
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pixels: RgbImage,
}

fn to_rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

impl RasterImage {
    /// Creates a blank (background colored) raster
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, to_rgb(BACKGROUND)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|Rgb([r, g, b])| Color32::from_rgb(*r, *g, *b))
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn is_blank(&self) -> bool {
        let bg = to_rgb(BACKGROUND);
        self.pixels.pixels().all(|p| *p == bg)
    }

    /// Replaces the buffer with a fresh blank one of the same size
    pub fn clear(&mut self) {
        *self = Self::new(self.width(), self.height());
    }

    /// Paints the body of the segment as a band `width` pixels across,
    /// sampling pixel centres. Ends are square at the endpoints with no caps
    /// and a zero-length segment paints nothing. Parts outside the raster are
    /// clipped.
    pub fn draw_segment(&mut self, segment: &StrokeSegment) {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        let radius = segment.width() / 2.0;
        let (from, to) = (segment.from(), segment.to());
        let along = to - from;
        let len_sq = along.length_sq();
        if len_sq == 0.0 || radius <= 0.0 {
            return;
        }

        let max_x = (from.x.max(to.x) + radius).ceil().min((self.width() - 1) as f32);
        let max_y = (from.y.max(to.y) + radius).ceil().min((self.height() - 1) as f32);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as u32;

        let color = to_rgb(segment.color());
        let radius_sq = radius * radius;
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = (centre - from).dot(along) / len_sq;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let closest = from + along * t;
                if (centre - closest).length_sq() < radius_sq {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Encodes the raster into any seekable writer
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: &mut W,
        format: ImageFormat,
    ) -> Result<(), image::ImageError> {
        self.pixels.write_to(writer, format)
    }

    pub fn save(&self, path: &std::path::Path, format: ImageFormat) -> Result<(), image::ImageError> {
        self.pixels.save_with_format(path, format)
    }
}
