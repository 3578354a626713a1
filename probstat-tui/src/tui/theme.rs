use crate::tui::app::StatusLevel;
use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight: Color,
    pub muted: Color,
    pub bar: Color,
    pub bar_alt: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            muted: Color::DarkGray,
            bar: Color::LightBlue,
            bar_alt: Color::LightGreen,
            error: Color::Red,
            warning: Color::LightYellow,
            success: Color::LightGreen,
        }
    }
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            highlight: Color::Blue,
            muted: Color::Gray,
            bar: Color::Blue,
            bar_alt: Color::Green,
            error: Color::Red,
            warning: Color::LightYellow,
            success: Color::Green,
        }
    }
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            highlight: Color::Rgb(136, 192, 208),
            muted: Color::Rgb(76, 86, 106),
            bar: Color::Rgb(129, 161, 193),
            bar_alt: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
            success: Color::Rgb(163, 190, 140),
        }
    }
    pub fn catppuccin() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            highlight: Color::Rgb(137, 180, 250),
            muted: Color::Rgb(108, 112, 134),
            bar: Color::Rgb(137, 220, 235),
            bar_alt: Color::Rgb(166, 227, 161),
            error: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
            success: Color::Rgb(166, 227, 161),
        }
    }
    pub fn colorblind() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            muted: Color::DarkGray,
            bar: Color::Rgb(0x00, 0x80, 0xFF),
            bar_alt: Color::Rgb(0xFF, 0x8C, 0x00), // orange instead of green
            error: Color::Rgb(0xFF, 0x8C, 0x00),
            warning: Color::LightYellow,
            success: Color::Rgb(0x00, 0x80, 0xFF),
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "nord" => Self::nord(),
            "catppuccin" => Self::catppuccin(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }
    /// Terminal colour for a figure's named bar colour.
    pub fn bar_color(&self, name: &str) -> Color {
        match name {
            "skyblue" => self.bar,
            "lightgreen" => self.bar_alt,
            _ => self.fg,
        }
    }
    pub fn status_color(&self, level: StatusLevel) -> Color {
        match level {
            StatusLevel::Info => self.fg,
            StatusLevel::Success => self.success,
            StatusLevel::Warning => self.warning,
            StatusLevel::Error => self.error,
        }
    }
}
