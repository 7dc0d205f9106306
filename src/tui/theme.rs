use ratatui::style::Color;

use crate::config::ThemeName;
use crate::player::PlaybackStatus;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub accent: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub dim: Color,
    pub surface: Color,
    pub surface_light: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self {
                accent: Color::Rgb(100, 180, 255),
                green: Color::Rgb(80, 220, 130),
                yellow: Color::Rgb(240, 200, 80),
                red: Color::Rgb(240, 90, 90),
                dim: Color::Rgb(100, 100, 115),
                surface: Color::Reset,
                surface_light: Color::Reset,
                text: Color::Rgb(220, 220, 230),
                text_dim: Color::Rgb(140, 140, 155),
                border: Color::Rgb(55, 55, 70),
                highlight_bg: Color::Rgb(60, 60, 80),
            },
            ThemeName::Gruvbox => Self {
                accent: Color::Rgb(131, 165, 152),
                green: Color::Rgb(184, 187, 38),
                yellow: Color::Rgb(250, 189, 47),
                red: Color::Rgb(251, 73, 52),
                dim: Color::Rgb(146, 131, 116),
                surface: Color::Reset,
                surface_light: Color::Reset,
                text: Color::Rgb(235, 219, 178),
                text_dim: Color::Rgb(168, 153, 132),
                border: Color::Rgb(80, 73, 69),
                highlight_bg: Color::Rgb(80, 73, 69),
            },
        }
    }

    pub fn status_color(&self, status: PlaybackStatus) -> Color {
        match status {
            PlaybackStatus::Playing => self.green,
            PlaybackStatus::Paused => self.yellow,
            PlaybackStatus::Stopped => self.dim,
            PlaybackStatus::Unavailable => self.red,
        }
    }
}
