use egui::Color32;

/// Background color of both the visible canvas and the raster
pub const BACKGROUND: Color32 = Color32::WHITE;

pub const PEN_COLOR: Color32 = Color32::BLACK;
pub const PEN_WIDTH: f32 = 4.0;
pub const ERASER_WIDTH: f32 = 8.0;

/// Whether the next stroke segment draws or erases
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Draw,
    /// Paints with the background color using a wider stroke
    Erase,
}

impl Mode {
    pub fn color(self) -> Color32 {
        match self {
            Self::Draw => PEN_COLOR,
            Self::Erase => BACKGROUND,
        }
    }

    pub fn width(self) -> f32 {
        match self {
            Self::Draw => PEN_WIDTH,
            Self::Erase => ERASER_WIDTH,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Draw => Self::Erase,
            Self::Erase => Self::Draw,
        }
    }

    /// Display name of the mode itself
    pub fn label(self) -> &'static str {
        match self {
            Self::Draw => "Pencil",
            Self::Erase => "Eraser",
        }
    }

    /// Caption for the toggle button: names the mode a click switches to
    pub fn toggle_caption(self) -> &'static str {
        self.toggled().label()
    }
}
