#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

use ratatui::style::Color;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    Light,
    Dark,
}

/// Colours used by the chat list and the message thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub user: Color,
    pub assistant: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub danger: Color,
}

impl ThemeName {
    pub fn parse(text: &str) -> Option<ThemeName> {
        return ThemeName::iter().find(|e| return e.to_string() == text);
    }

    pub fn toggle(self) -> ThemeName {
        match self {
            ThemeName::Light => return ThemeName::Dark,
            ThemeName::Dark => return ThemeName::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeName::Light => return "🌙",
            ThemeName::Dark => return "☀️",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeName::Light => {
                return Palette {
                    background: Color::Rgb(250, 250, 250),
                    text: Color::Black,
                    muted: Color::DarkGray,
                    user: Color::Blue,
                    assistant: Color::Rgb(138, 85, 63),
                    selection_fg: Color::White,
                    selection_bg: Color::Blue,
                    danger: Color::Red,
                };
            }
            ThemeName::Dark => {
                return Palette {
                    background: Color::Rgb(30, 30, 30),
                    text: Color::White,
                    muted: Color::Gray,
                    user: Color::LightCyan,
                    assistant: Color::Rgb(229, 192, 123),
                    selection_fg: Color::Black,
                    selection_bg: Color::LightCyan,
                    danger: Color::LightRed,
                };
            }
        }
    }
}
