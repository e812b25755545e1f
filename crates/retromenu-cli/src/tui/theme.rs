//! Colors used by the terminal host

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_color: Color,
    pub text_color: Color,
    pub dim_color: Color,
    pub accent_color: Color,
    pub border_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub marked_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::retro()
    }
}

impl Theme {
    pub fn retro() -> Self {
        Self {
            bg_color: Color::Rgb(18, 18, 28),
            text_color: Color::Rgb(230, 230, 240),
            dim_color: Color::Rgb(100, 100, 120),
            accent_color: Color::Rgb(255, 196, 0),
            border_color: Color::Rgb(90, 120, 200),
            success_color: Color::Rgb(80, 220, 120),
            warning_color: Color::Rgb(255, 110, 90),
            marked_color: Color::Rgb(200, 120, 255),
        }
    }
}
