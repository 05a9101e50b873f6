use crossterm::style::Color;
use puzzle_core::AccentColor;
use serde::{Deserialize, Serialize};

/// Persisted theme choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Switched-on cells, lit bulbs, visited nodes
    pub on: Color,
    /// Walls and unused lattice points
    pub wall: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            on: Color::Rgb { r: 255, g: 220, b: 110 },
            wall: Color::Rgb { r: 45, g: 48, b: 60 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            on: Color::Rgb { r: 215, g: 150, b: 0 },
            wall: Color::Rgb { r: 200, g: 200, b: 210 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// A puzzle's accent as a terminal color
    pub fn accent(&self, accent: AccentColor) -> Color {
        let (r, g, b) = accent.rgb();
        Color::Rgb { r, g, b }
    }
}
