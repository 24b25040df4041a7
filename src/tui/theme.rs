// Theme system for the TUI
//
// A theme is a flat palette; every component reads colors from it instead
// of hardcoding them.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Accents
    pub title: Color,
    pub highlight: Color,
    pub link: Color,
    pub liked: Color,
    pub error: Color,

    // Card surface
    pub card_background: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`]
    pub const NAMES: [&'static str; 3] = ["Midnight", "Paper", "Terminal"];

    /// Look up a theme by name (case-insensitive), falling back to Midnight
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "paper" => Self::paper(),
            "terminal" => Self::terminal(),
            "midnight" => Self::midnight(),
            other => {
                tracing::warn!(
                    "Unknown theme '{}', using Midnight (available: {})",
                    other,
                    Self::NAMES.join(", ")
                );
                Self::midnight()
            }
        }
    }

    /// Black backdrop with a lifted card, the feed's signature look
    pub fn midnight() -> Self {
        Self {
            name: "Midnight".to_string(),
            background: Color::Rgb(0, 0, 0),
            foreground: Color::Rgb(240, 240, 240),
            muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 60, 60),
            border_type: BorderType::Rounded,
            title: Color::Rgb(255, 255, 255),
            highlight: Color::Rgb(96, 165, 250),
            link: Color::Rgb(96, 165, 250),
            liked: Color::Rgb(239, 68, 68),
            error: Color::Rgb(248, 113, 113),
            card_background: Color::Rgb(18, 18, 20),
            selection: Color::Rgb(38, 38, 44),
        }
    }

    pub fn paper() -> Self {
        Self {
            name: "Paper".to_string(),
            background: Color::Rgb(250, 248, 240),
            foreground: Color::Rgb(40, 40, 40),
            muted: Color::Rgb(120, 113, 108),
            border: Color::Rgb(214, 211, 209),
            border_type: BorderType::Plain,
            title: Color::Rgb(28, 25, 23),
            highlight: Color::Rgb(37, 99, 235),
            link: Color::Rgb(37, 99, 235),
            liked: Color::Rgb(220, 38, 38),
            error: Color::Rgb(185, 28, 28),
            card_background: Color::Rgb(255, 255, 255),
            selection: Color::Rgb(231, 229, 228),
        }
    }

    /// Defers to the terminal's own palette
    pub fn terminal() -> Self {
        Self {
            name: "Terminal".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_type: BorderType::Plain,
            title: Color::White,
            highlight: Color::Cyan,
            link: Color::Blue,
            liked: Color::Red,
            error: Color::LightRed,
            card_background: Color::Reset,
            selection: Color::DarkGray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("paper").name, "Paper");
        assert_eq!(Theme::by_name("TERMINAL").name, "Terminal");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(Theme::by_name("Dracula").name, "Midnight");
    }

    #[test]
    fn test_all_names_resolve() {
        for name in Theme::NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
    }
}
