use ratatui::style::Color;

/// Colour scheme preference. Initialised from config and flipped only by
/// `AppContext::toggle_theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Resolved colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                highlight: Color::Yellow,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Yellow,
            },
            Self::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight: Color::Magenta,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Rgb(184, 134, 11),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light "), Some(Theme::Light));
        assert_eq!(Theme::parse("system"), None);
    }

    #[test]
    fn test_toggled_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.palette().background, Theme::Light.palette().background);
    }
}
